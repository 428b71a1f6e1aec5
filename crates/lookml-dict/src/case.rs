/// Converts an application key (`camelCase`) to a DSL key (`snake_case`).
///
/// Every uppercase letter is lowercased and, unless it starts the key,
/// preceded by `_`.
pub fn to_dsl_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (index, c) in key.chars().enumerate() {
        if c.is_uppercase() {
            if index > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
