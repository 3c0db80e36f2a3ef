/// French ordinal abbreviation: `1ère`/`1er`, then `2ème`, `3ème`, ...
pub fn ordinal_fr(n: usize, feminine: bool) -> String {
    match (n, feminine) {
        (1, true) => "1ère".to_string(),
        (1, false) => "1er".to_string(),
        (n, _) => format!("{n}ème"),
    }
}
