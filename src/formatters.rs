use crate::models::{round_price, SelectedOutfit};

/// Currency symbol used in every displayed price
pub const CURRENCY_SYMBOL: &str = "₹";

const SHARE_HEADER: &str = "Check out my outfit from Dripcheck by Dripstreet!";
const SHARE_ENDPOINT: &str = "https://wa.me/";

/// Group an integer into thousands with commas: 12345 -> "12,345"
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Rounded, grouped price with currency symbol: 1299.5 -> "₹1,300"
pub fn format_price(price: f64) -> String {
    format_amount(round_price(price))
}

/// Grouped whole amount with currency symbol
pub fn format_amount(amount: u64) -> String {
    format!("{CURRENCY_SYMBOL}{}", group_thousands(amount))
}

/// Render an outfit as a plain-text share message.
///
/// One block per selected item in display order, then the rounded total.
pub fn format_share_message(outfit: &SelectedOutfit) -> String {
    let blocks: Vec<String> = outfit
        .iter()
        .map(|(category, item)| {
            format!(
                "{}: {} - {}\nProduct Link: {}",
                category,
                item.name,
                format_price(item.price),
                item.product_link
            )
        })
        .collect();

    let mut output = String::new();
    output.push_str(SHARE_HEADER);
    output.push_str("\n\n");
    if !blocks.is_empty() {
        output.push_str(&blocks.join("\n\n"));
        output.push_str("\n\n");
    }
    output.push_str(&format!("Total: {}", format_amount(outfit.total_price())));
    output
}

/// Link that opens the chat share dialog prefilled with `message`
pub fn share_url(message: &str) -> String {
    format!("{SHARE_ENDPOINT}?text={}", urlencoding::encode(message))
}
