/// Class-safe slug of a series name: lowercase alphanumerics joined by `-`.
#[must_use]
pub fn series_name_to_class(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// `"<extras> s-<index + 1> <slug>"`, e.g. `"series s-1 revenue"`.
#[must_use]
pub fn series_class_name(extras: &str, index: usize, name: &str) -> String {
    let slug = series_name_to_class(name);
    let mut class = format!("{extras} s-{}", index + 1);
    if !slug.is_empty() {
        class.push(' ');
        class.push_str(&slug);
    }
    class.trim_start().to_owned()
}
