/// Vendor product pages, one URL per line.
const BUILTIN_SEEDS: &str = include_str!("../seeds.txt");

/// Seed URLs from a line-oriented list. Blank lines and `#` comments are skipped.
pub fn parse_seed_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

pub fn builtin_seeds() -> Vec<String> {
    parse_seed_list(BUILTIN_SEEDS)
}
