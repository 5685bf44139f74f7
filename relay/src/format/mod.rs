//! Signal formatting - turning loose alert JSON into a Telegram HTML message.
//!
//! Alert payloads have no fixed schema. Each logical field is resolved
//! through an ordered list of candidate keys (first present, non-null value
//! wins), escaped for HTML, and assembled into a fixed line order. Missing
//! fields render as a literal `-`.

pub mod escape;
pub mod time;

pub use escape::escape_html;
pub use time::{normalize_time, TimeDisplay};

use serde_json::{Map, Value};

/// Rendered in place of any absent optional field.
const PLACEHOLDER: &str = "-";

/// Return the first present, non-null value among the candidate keys.
fn first_present<'a>(payload: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| payload.get(*k))
        .find(|v| !v.is_null())
}

/// Display form of a JSON value: strings verbatim, everything else via its
/// JSON representation. Nested structures are treated opaquely.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Resolve a logical field to its escaped display form, `-` when absent.
fn field(payload: &Map<String, Value>, keys: &[&str]) -> String {
    match first_present(payload, keys) {
        Some(v) => escape_html(&display(v)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a validated alert payload into the relay message.
///
/// Deterministic: the same payload always yields the same text. The fixed
/// lines (banner, symbol, side/price, time) are always present; the SL/TP
/// line, extras line and notes line are omitted entirely when empty.
pub fn format_signal(payload: &Map<String, Value>) -> String {
    let symbol = field(payload, &["symbol", "ticker", "pair"]);
    let side = match first_present(payload, &["side", "direction"]) {
        Some(v) => escape_html(&display(v)),
        None => "?".to_string(),
    };
    let price = field(payload, &["price", "entry", "close"]);

    let time_str = match normalize_time(first_present(payload, &["time", "timestamp"])) {
        TimeDisplay::Absent => PLACEHOLDER.to_string(),
        // Fixed YYYY-MM-DD HH:MM:SS UTC shape, nothing to escape
        TimeDisplay::Parsed(s) => s,
        TimeDisplay::Raw(s) => escape_html(&s),
    };

    let sl = field(payload, &["sl", "stop", "stop_loss"]);
    let tp1 = field(payload, &["tp1", "tp_1"]);
    let tp2 = field(payload, &["tp2", "tp_2"]);

    let mut lines = vec![
        "🟢 <b>TRADING ALERT</b>".to_string(),
        format!("• <b>Symbol</b>: {symbol}"),
        format!("• <b>Side</b>: {side}  @ <b>{price}</b>"),
        format!("• <b>Time</b>: {time_str}"),
    ];

    if sl != PLACEHOLDER || tp1 != PLACEHOLDER || tp2 != PLACEHOLDER {
        lines.push(format!(
            "• <b>SL</b>: {sl}  |  <b>TP1</b>: {tp1}  |  <b>TP2</b>: {tp2}"
        ));
    }

    let extras: Vec<String> = [
        ("RR", field(payload, &["rr", "risk_reward"])),
        ("Session", field(payload, &["session", "sess"])),
        ("Fibo", field(payload, &["fib_trigger", "fib"])),
        ("BOS", field(payload, &["bos", "break_of_structure"])),
        ("FVG", field(payload, &["fvg"])),
        ("OB", field(payload, &["ob", "order_block"])),
    ]
    .into_iter()
    .filter(|(_, value)| value != PLACEHOLDER)
    .map(|(label, value)| format!("{label} {value}"))
    .collect();

    if !extras.is_empty() {
        lines.push(format!("• {}", extras.join(" · ")));
    }

    let notes = field(payload, &["reason", "notes", "setup"]);
    if notes != PLACEHOLDER {
        lines.push(format!("• <b>Notes</b>: {notes}"));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn test_first_present_priority_order() {
        let p = payload(json!({"ticker": "GBPUSD", "pair": "EURUSD"}));
        assert_eq!(field(&p, &["symbol", "ticker", "pair"]), "GBPUSD");
    }

    #[test]
    fn test_first_present_skips_null() {
        let p = payload(json!({"symbol": null, "ticker": "XAUUSD"}));
        assert_eq!(field(&p, &["symbol", "ticker", "pair"]), "XAUUSD");
    }

    #[test]
    fn test_numbers_use_json_representation() {
        let p = payload(json!({"price": 1.085}));
        assert_eq!(field(&p, &["price", "entry", "close"]), "1.085");
    }

    #[test]
    fn test_full_message() {
        let p = payload(json!({
            "secret": "S",
            "symbol": "EURUSD",
            "side": "buy",
            "price": 1.085,
            "sl": 1.08,
            "tp1": 1.09
        }));

        let text = format_signal(&p);
        let lines: Vec<&str> = text.split('\n').collect();

        assert_eq!(
            lines,
            vec![
                "🟢 <b>TRADING ALERT</b>",
                "• <b>Symbol</b>: EURUSD",
                "• <b>Side</b>: buy  @ <b>1.085</b>",
                "• <b>Time</b>: -",
                "• <b>SL</b>: 1.08  |  <b>TP1</b>: 1.09  |  <b>TP2</b>: -",
            ]
        );
    }

    #[test]
    fn test_minimal_payload_renders_dashes() {
        let p = payload(json!({"secret": "S"}));
        let text = format_signal(&p);
        let lines: Vec<&str> = text.split('\n').collect();

        // No SL/TP line, no extras, no notes; side falls back to "?"
        assert_eq!(
            lines,
            vec![
                "🟢 <b>TRADING ALERT</b>",
                "• <b>Symbol</b>: -",
                "• <b>Side</b>: ?  @ <b>-</b>",
                "• <b>Time</b>: -",
            ]
        );
    }

    #[test]
    fn test_markup_in_payload_is_escaped() {
        let p = payload(json!({"side": "<script>", "symbol": "A&B"}));
        let text = format_signal(&p);

        assert!(text.contains("• <b>Side</b>: &lt;script&gt;"));
        assert!(text.contains("• <b>Symbol</b>: A&amp;B"));
        assert!(!text.contains("<script>"));
    }

    #[test]
    fn test_extras_joined_in_order() {
        let p = payload(json!({"rr": "1:3", "fvg": "yes", "session": "london"}));
        let text = format_signal(&p);

        assert!(text.contains("• RR 1:3 · Session london · FVG yes"));
    }

    #[test]
    fn test_notes_alias_chain() {
        let p = payload(json!({"setup": "break and retest"}));
        let text = format_signal(&p);
        assert!(text.contains("• <b>Notes</b>: break and retest"));

        let p = payload(json!({"reason": "liquidity sweep", "setup": "ignored"}));
        let text = format_signal(&p);
        assert!(text.contains("• <b>Notes</b>: liquidity sweep"));
    }

    #[test]
    fn test_time_string_shown_verbatim_escaped() {
        let p = payload(json!({"time": "2024-05-01 <session open>"}));
        let text = format_signal(&p);
        assert!(text.contains("• <b>Time</b>: 2024-05-01 &lt;session open&gt;"));
    }

    #[test]
    fn test_deterministic() {
        let p = payload(json!({"symbol": "EURUSD", "time": 1_700_000_000, "rr": 2}));
        assert_eq!(format_signal(&p), format_signal(&p));
    }
}
