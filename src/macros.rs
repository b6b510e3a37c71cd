/// Builds a DNA tree from an adjacency list, panicking on malformed input.
#[macro_export]
macro_rules! tree {
    ($e:expr) => {{
        use $crate::alphabets::dna_alphabet;
        use $crate::io::parse_tree;
        parse_tree($e, &dna_alphabet()).unwrap()
    }};
}
