//! Text helpers shared by the renderers

/// Display label for a skill category key
///
/// Underscores become spaces and only the first character is upper-cased:
/// `soft_skills` becomes `Soft skills`.
pub fn humanize_category(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replace every run of whitespace with a single underscore
///
/// Leading and trailing runs are replaced too, so `" Jo  Doe"` becomes `"_Jo_Doe"`.
pub fn underscore_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
