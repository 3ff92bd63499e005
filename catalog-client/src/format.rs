//! Display helpers

/// `"home-decoration"` → `"Home Decoration"`
pub fn format_category_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Price in baht, number printed as-is
pub fn format_price(price: f64) -> String {
    format!("฿{price}")
}

pub fn format_discount(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}%"),
        None => "—".to_string(),
    }
}
