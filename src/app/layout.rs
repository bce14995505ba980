//! Plain-text rendering for the terminal.

use crate::domain::card::{Suit, Taxonomy};
use crate::domain::model::{AnalysisResult, CompleteReading, SingleCardReading};
use crate::domain::spread::{Position, Spread, SpreadInfo};

const INDENT: &str = "            ";
const GAP: &str = "        ";

fn heading(position: Position) -> String {
    format!("{}号位置 ({})", position.number(), position.aspect())
}

/// 十字形布局：4 在上，1 5 3 橫排，2 在下
pub fn render_spread(spread: &Spread) -> String {
    let top = Position::Material;
    let bottom = Position::Emotion;
    let row = [Position::Action, Position::Spirit, Position::Intellect];

    let mut lines = vec![
        "=== 四季牌阵 ===".to_string(),
        String::new(),
        format!("{}{}", INDENT, heading(top)),
        format!("{}{}", INDENT, spread.get(top)),
        String::new(),
        row.iter().map(|&p| heading(p)).collect::<Vec<_>>().join(GAP),
        row.iter()
            .map(|&p| spread.get(p).display_name())
            .collect::<Vec<_>>()
            .join(GAP),
        String::new(),
        format!("{}{}", INDENT, heading(bottom)),
        format!("{}{}", INDENT, spread.get(bottom)),
    ];
    lines.push(String::new());
    lines.join("\n")
}

pub fn render_cards() -> String {
    let mut taxonomies = vec![Taxonomy::Major];
    taxonomies.extend(Suit::ALL.iter().map(|&s| Taxonomy::Minor(s)));

    let mut out = String::new();
    let mut total = 0;
    for taxonomy in taxonomies {
        let members = taxonomy.members();
        total += members.len();
        let names: Vec<String> = members.iter().map(|a| a.name()).collect();
        out.push_str(&format!("{} ({}张)\n  {}\n", taxonomy.name(), members.len(), names.join("、")));
    }
    out.push_str(&format!("共 {} 张\n", total));
    out
}

pub fn render_spread_info(info: &SpreadInfo) -> String {
    let mut out = format!("{}\n{}\n\n", info.name, info.description);
    for p in &info.positions {
        out.push_str(&format!(
            "{}号位置 [{}] {}（{}）：{}\n",
            p.number, p.season, p.name, p.suit, p.meaning
        ));
    }
    out.push_str(&format!("\n布局：\n{}\n\n{}\n", info.layout, info.traditional_use));
    out
}

pub fn render_analysis(result: &AnalysisResult) -> String {
    format!(
        "📋 牌面摘要：\n{}\n\n📝 完整解读：\n{}\n",
        result.cards_summary, result.full_analysis
    )
}

pub fn render_single_reading(reading: &SingleCardReading) -> String {
    let mut out = format!("🃏 {}\n❓ {}\n\n", reading.card, reading.question);
    out.push_str(&format!("【牌面解读】\n{}\n", reading.interpretation));
    if !reading.guidance.is_empty() {
        out.push_str(&format!("\n【实用指导】\n{}\n", reading.guidance));
    }
    if !reading.key_message.is_empty() {
        out.push_str(&format!("\n【核心信息】\n{}\n", reading.key_message));
    }
    out
}

pub fn render_complete(reading: &CompleteReading) -> String {
    format!(
        "{}\n✨ 核心洞察：{}\n\n🌟 季节建议：\n{}\n\n{}\n🕒 {}\n",
        render_spread(&reading.spread),
        reading.insight,
        reading.advice.seasonal_advice,
        render_analysis(&reading.analysis),
        reading.timestamp.to_rfc3339()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::spread::{draw_spread_with, spread_info};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_render_spread_contains_every_card() {
        let spread = draw_spread_with(&mut StdRng::seed_from_u64(3));
        let text = render_spread(&spread);
        for (position, card) in spread.iter() {
            assert!(text.contains(&heading(position)));
            assert!(text.contains(&card.display_name()));
        }
        // 4 號位置在最上方
        assert!(text.find("4号位置").unwrap() < text.find("1号位置").unwrap());
        assert!(text.find("1号位置").unwrap() < text.find("2号位置").unwrap());
    }

    #[test]
    fn test_render_cards_totals() {
        let text = render_cards();
        assert!(text.contains("大阿尔卡纳 (22张)"));
        assert!(text.contains("金币牌组 (14张)"));
        assert!(text.contains("共 78 张"));
    }

    #[test]
    fn test_render_spread_info() {
        let text = render_spread_info(&spread_info());
        assert!(text.contains("5号位置 [核心] 心灵成长（大阿尔卡纳）"));
    }
}
