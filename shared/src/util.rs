/// Normalize a category name to its slug form.
///
/// Trims, lowercases, collapses every whitespace run into a single `-` and
/// drops apostrophes: `"Men's Shirts"` → `"mens-shirts"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.trim().chars() {
        if ch.is_whitespace() {
            if !in_space {
                slug.push('-');
                in_space = true;
            }
            continue;
        }
        in_space = false;
        if ch == '\'' || ch == '\u{2019}' {
            continue;
        }
        slug.extend(ch.to_lowercase());
    }
    slug
}
