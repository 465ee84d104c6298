//! Description composition for calendar entries.
//!
//! Builds the multi-line text blob of an entry from the optional sections of
//! a record. Blocks absent from the record are silently omitted; only a
//! registration section without a URL is an error. Text passes through
//! unmodified - wire escaping is the serializer's concern.

use crate::error::RaceCalResult;
use crate::record::{Cost, RaceRecord, Registration, scalar_text};

/// Compose the description of a race-day entry.
pub fn race_day(record: &RaceRecord) -> RaceCalResult<String> {
    let mut lines: Vec<String> = Vec::new();

    if let Some(details) = &record.details {
        if let Some(text) = &details.description {
            lines.push(text.trim().to_string());
            lines.push(String::new());
        }
    }

    if let Some(categories) = &record.categories {
        lines.push("竞赛项目 (Race Categories):".to_string());
        for cat in categories {
            let unit = cat.distance_unit.as_deref().unwrap_or("km");
            let capacity = cat
                .capacity
                .as_ref()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            lines.push(format!("• {}: {}{} - {}人", cat.name, cat.distance, unit, capacity));
        }
        lines.push(String::new());
    }

    if let Some(reg) = &record.registration {
        lines.push("报名信息 (Registration):".to_string());
        lines.push(format!("Opens: {}", reg.open_date().unwrap_or("N/A")));
        lines.push(format!("Closes: {}", reg.close_date().unwrap_or("N/A")));

        if let Some(lottery) = &reg.lottery_date {
            lines.push(format!("Lottery Results: {}", lottery));
        }

        lines.push(format!("URL: {}", reg.url(record.label())?));

        if let Some(cost) = &reg.cost {
            lines.push(format!("Cost: {}", cost_inline(cost)));
        }

        if let Some(requirements) = &reg.requirements {
            lines.push(String::new());
            lines.push("Requirements:".to_string());
            for requirement in requirements {
                lines.push(format!("  • {}", requirement));
            }
        }

        if let Some(pickup) = &reg.packet_pickup {
            lines.push(String::new());
            lines.push(format!("Packet Pickup: {} to {}", pickup.start, pickup.end));
            if let Some(note) = &pickup.note {
                lines.push(format!("  {}", note));
            }
        }

        lines.push(String::new());
    }

    if let Some(details) = &record.details {
        if let Some(contact) = &details.contact {
            lines.push("联系方式 (Contact):".to_string());
            if let Some(wechat) = &contact.wechat {
                lines.push(format!("WeChat: {}", wechat));
            }
            if let Some(email) = &contact.email {
                lines.push(format!("Email: {}", email));
            }
            if let Some(website) = &details.website {
                lines.push(format!("Website: {}", website));
            }
        }
    }

    Ok(lines.join("\n"))
}

/// Compose the description of a registration-window entry. Bilingually
/// labeled, and always leads with the race date and registration URL.
pub fn registration(record: &RaceRecord, reg: &Registration) -> RaceCalResult<String> {
    let name = record.name()?;
    let mut lines: Vec<String> = vec![
        format!("{} 报名窗口期", name),
        format!("{} Registration Window", name),
        String::new(),
        format!("比赛日期 (Race Date): {}", record.date()?),
        String::new(),
        format!("报名网址 (Registration URL): {}", reg.url(record.label())?),
    ];

    if let Some(lottery) = &reg.lottery_date {
        lines.push(format!("抽签结果公布 (Lottery Results): {}", lottery));
    }

    if let Some(cost) = &reg.cost {
        lines.push(String::new());
        lines.push("费用 (Cost):".to_string());
        match cost {
            Cost::Tiered(map) => {
                for (key, value) in map {
                    lines.push(format!(
                        "  • {}: {}",
                        title_case(&scalar_text(key)),
                        scalar_text(value)
                    ));
                }
            }
            Cost::Flat(value) => lines.push(format!("  {}", value)),
        }
    }

    if let Some(requirements) = &reg.requirements {
        lines.push(String::new());
        lines.push("要求 (Requirements):".to_string());
        for requirement in requirements {
            lines.push(format!("  • {}", requirement));
        }
    }

    if let Some(pickup) = &reg.packet_pickup {
        lines.push(String::new());
        lines.push(format!("领物时间 (Packet Pickup): {} - {}", pickup.start, pickup.end));
        if let Some(note) = &pickup.note {
            lines.push(format!("  {}", note));
        }
    }

    if let Some(details) = &record.details {
        if let Some(contact) = &details.contact {
            lines.push(String::new());
            lines.push("联系方式 (Contact):".to_string());
            if let Some(wechat) = &contact.wechat {
                lines.push(format!("  WeChat: {}", wechat));
            }
            if let Some(email) = &contact.email {
                lines.push(format!("  Email: {}", email));
            }
        }
    }

    Ok(lines.join("\n"))
}

/// Cost rendered on one line: mapping entries joined by commas, a scalar
/// as-is.
fn cost_inline(cost: &Cost) -> String {
    match cost {
        Cost::Tiered(map) => map
            .iter()
            .map(|(key, value)| format!("{}: {}", title_case(&scalar_text(key)), scalar_text(value)))
            .collect::<Vec<_>>()
            .join(", "),
        Cost::Flat(value) => value.to_string(),
    }
}

/// Title-case a cost key: the first letter of each alphabetic run is
/// upper-cased, the rest lowered (`early_bird` becomes `Early_Bird`).
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut start_of_word = true;

    for c in s.chars() {
        if c.is_alphabetic() {
            if start_of_word {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            start_of_word = false;
        } else {
            out.push(c);
            start_of_word = true;
        }
    }

    out
}
