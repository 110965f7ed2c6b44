use std::fs;
use std::process;

use tex_engine::settings::{default_toml, parse_settings_toml};
use tex_engine::FeatureToggles;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", default_toml());
}

/// Names of the toggles switched on, in table order.
pub fn enabled_features(f: &FeatureToggles) -> Vec<&'static str> {
    [
        ("math_delimiters", f.math_delimiters),
        ("subscript_math", f.subscript_math),
        ("subscript_text", f.subscript_text),
        ("superscript_math", f.superscript_math),
        ("superscript_text", f.superscript_text),
        ("fast_fraction", f.fast_fraction),
        ("enclose_round_brackets", f.enclose_round_brackets),
        ("enclose_square_brackets", f.enclose_square_brackets),
        ("enclose_curly_brackets", f.enclose_curly_brackets),
        ("enclose_vertical_bars", f.enclose_vertical_bars),
    ]
    .into_iter()
    .filter_map(|(name, on)| on.then_some(name))
    .collect()
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(parse_settings_toml(&content), "Error: {}");
    let enabled = enabled_features(&s.features);
    println!("OK: {}/10 features enabled [{}]", enabled.len(), enabled.join(", "));
}
