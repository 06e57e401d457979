use rand::Rng;

/// Fixed palette handed out to comparison traces in order.
pub const DISTINCT_COLORS: [&str; 10] = [
    "#1f77b4", // blue
    "#ff7f0e", // orange
    "#2ca02c", // green
    "#d62728", // red
    "#9467bd", // purple
    "#8c564b", // brown
    "#e377c2", // pink
    "#7f7f7f", // gray
    "#bcbd22", // yellow-green
    "#17becf", // cyan
];

/// First palette color not in `in_use`, or a random `rgb(..)` once the palette is spent.
pub fn next_color<'a, I, R>(in_use: I, rng: &mut R) -> String
where
    I: IntoIterator<Item = &'a str>,
    R: Rng + ?Sized,
{
    let used: Vec<&str> = in_use.into_iter().collect();
    DISTINCT_COLORS
        .iter()
        .find(|color| !used.contains(*color))
        .map(|color| color.to_string())
        .unwrap_or_else(|| random_rgb(rng))
}

pub fn random_rgb<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "rgb({}, {}, {})",
        rng.gen::<u8>(),
        rng.gen::<u8>(),
        rng.gen::<u8>()
    )
}
