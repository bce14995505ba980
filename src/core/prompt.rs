//! Prompt construction for the Four Seasons spread and parsing of
//! sectioned model responses.

use crate::domain::card::Card;
use crate::domain::spread::{Position, Spread};
use regex::Regex;
use std::sync::LazyLock;

pub const ANALYSIS_FALLBACK: &str = "抱歉，AI分析服务暂时不可用。请检查网络连接和API配置。";
pub const INSIGHT_FALLBACK: &str = "静心聆听内在的声音，答案会在适当的时候显现。";
pub const ADVICE_FALLBACK: &str = "在这个特殊的时刻，相信自己的直觉，跟随内心的指引前行。";

pub const SINGLE_INTERPRETATION_FALLBACK: &str = ANALYSIS_FALLBACK;
pub const SINGLE_GUIDANCE_FALLBACK: &str = "请静心默念您的问题，相信内在的智慧会给您指引。";
pub const SINGLE_KEY_MESSAGE_FALLBACK: &str = "答案在您心中，相信自己的直觉。";

pub const INSIGHT_MAX_TOKENS: u32 = 100;
pub const ADVICE_MAX_TOKENS: u32 = 800;
pub const SINGLE_CARD_MAX_TOKENS: u32 = 600;
pub const PING_MAX_TOKENS: u32 = 5;

const MARK_INTERPRETATION: &str = "牌面解读";
const MARK_GUIDANCE: &str = "实用指导";
const MARK_KEY_MESSAGE: &str = "核心信息";

/// 占卜師角色設定，告知每個位置的含義
pub fn system_prompt() -> String {
    let positions = Position::ALL
        .iter()
        .map(|p| {
            format!(
                "- {}号位置（{}）：{} - {}",
                p.number(),
                p.taxonomy().name(),
                p.aspect(),
                p.meaning()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "你是一位经验丰富的塔罗牌占卜师和心灵导师，专精于四季牌阵的解读。

你的专业特长包括：
1. 深度理解塔罗牌的象征意义和灵性内涵
2. 精通四季牌阵的布局和各位置的含义
3. 能够将牌面含义与现实生活情况相结合
4. 提供富有洞察力和启发性的指导建议
5. 用温暖、智慧的语言与咨询者沟通

四季牌阵说明：
{}

请用专业、温暖、富有洞察力的语言进行解读，避免过于绝对化的预言，而是提供启发性的指导。",
        positions
    )
}

/// 牌陣摘要：核心位置在前，其餘依編號，一行一張
pub fn format_for_prompt(spread: &Spread) -> String {
    Position::PROMPT_ORDER
        .iter()
        .map(|&p| format!("{}：{}", p.prompt_label(), spread.get(p).display_name()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn analysis_prompt(cards_text: &str) -> String {
    format!(
        "请对以下四季牌阵进行深度分析：

{}

请从以下几个方面分析接下来季节的能量流动：

1. 整体概述：这个牌阵传达的核心信息和季节主题
2. 逐位解读：每个位置的牌面含义及其对应生活层面的能量指导
3. 牌面关联：不同位置之间的相互关系和能量流动模式
4. 实用建议：基于牌阵给出的具体行动建议和注意事项
5. 灵性指引：这个季度的精神成长方向和内在智慧

请用专业而温暖的语言，为咨询者提供富有启发性的季节性指导。",
        cards_text
    )
}

pub fn insight_prompt(cards_text: &str) -> String {
    format!(
        "基于以下四季牌阵结果，请给出一句话的核心洞察：

{}

请用一句富有诗意和启发性的话语来概括这个牌阵的核心信息。",
        cards_text
    )
}

pub fn advice_prompt(cards_text: &str) -> String {
    let aspects = Position::ALL
        .iter()
        .map(|p| format!("{}. {}建议", p.number(), p.aspect()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "基于以下四季牌阵，请为每个生活层面提供简洁的季节性建议：

{}

请分别为以下五个方面给出1-2句具体的行动建议：
{}

格式要求：每个建议控制在50字以内，语言温暖而具有指导性。",
        cards_text, aspects
    )
}

pub fn single_card_prompt(card: &Card, question: &str) -> String {
    let orientation = card.orientation().label();
    let card_type = if card.arcana().is_major() {
        "大阿尔卡纳"
    } else {
        "小阿尔卡纳"
    };

    format!(
        "作为专业的塔罗牌占卜师，请分析以下日常抽牌结果：

问题：{question}
抽取的牌：{card}
牌面类型：{card_type}

请从以下三个方面进行深度解读：

1. 【{MARK_INTERPRETATION}】：
   - 这张牌的核心象征意义
   - {orientation}状态下的特殊含义
   - 与用户问题的直接关联

2. 【{MARK_GUIDANCE}】：
   - 针对用户问题的具体建议
   - 今日或近期的行动指引
   - 需要注意的事项或挑战

3. 【{MARK_KEY_MESSAGE}】：
   - 一句话总结这张牌想传达的关键信息
   - 用简洁而富有启发性的语言表达

请用温暖、专业的语言，避免过于绝对化的预测，而是提供启发性的指导。回答控制在400字左右。",
        card = card.display_name(),
    )
}

pub fn ping_prompt() -> &'static str {
    "请回复\"OK\""
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleCardSections {
    pub interpretation: String,
    pub guidance: String,
    pub key_message: String,
}

static SECTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【([^】]+)】[：:]?").expect("section marker pattern"));

/// 依 【牌面解读】【实用指导】【核心信息】 標記切分回應；
/// 找不到任何標記時整段作為 interpretation
pub fn parse_single_card_sections(text: &str) -> SingleCardSections {
    let mut sections = SingleCardSections::default();

    let matches: Vec<_> = SECTION_MARKER.captures_iter(text).collect();
    for (i, caps) in matches.iter().enumerate() {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let end = matches
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());
        let mut body = text[whole.end()..end].trim();
        // 去掉下一段的編號殘留，例如 "\n\n2."
        if let Some((head, last)) = body.rsplit_once('\n') {
            let number = last.trim().trim_end_matches('.');
            if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
                body = head.trim_end();
            }
        }
        let body = body.to_string();

        match name.as_str() {
            MARK_INTERPRETATION => sections.interpretation = body,
            MARK_GUIDANCE => sections.guidance = body,
            MARK_KEY_MESSAGE => sections.key_message = body,
            _ => {}
        }
    }

    if sections.interpretation.is_empty()
        && sections.guidance.is_empty()
        && sections.key_message.is_empty()
    {
        sections.interpretation = text.trim().to_string();
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::{Arcana, MajorArcana, MinorRank, Suit};

    fn fixed_spread() -> Spread {
        Spread::new(
            Card::upright(Arcana::Minor {
                suit: Suit::Wands,
                rank: MinorRank::Ace,
            }),
            Card::reversed(Arcana::Minor {
                suit: Suit::Cups,
                rank: MinorRank::Three,
            }),
            Card::upright(Arcana::Minor {
                suit: Suit::Swords,
                rank: MinorRank::Page,
            }),
            Card::reversed(Arcana::Minor {
                suit: Suit::Pentacles,
                rank: MinorRank::King,
            }),
            Card::upright(Arcana::Major(MajorArcana::Star)),
        )
        .unwrap()
    }

    #[test]
    fn test_format_for_prompt_order_and_text() {
        let text = format_for_prompt(&fixed_spread());
        let expected = "5号位置（大阿尔卡纳-心灵成长）：星星 (正位)
1号位置（权杖牌组-行动力）：权杖一 (正位)
2号位置（圣杯牌组-情感状态）：圣杯三 (逆位)
3号位置（宝剑牌组-理性思维）：宝剑侍从 (正位)
4号位置（金币牌组-事业财务）：金币国王 (逆位)";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_format_for_prompt_is_deterministic() {
        let spread = fixed_spread();
        assert_eq!(format_for_prompt(&spread), format_for_prompt(&spread));
    }

    #[test]
    fn test_system_prompt_describes_every_position() {
        let prompt = system_prompt();
        assert!(prompt.contains("1号位置（权杖牌组）：行动力 - 关于意志、创造与行动层面"));
        assert!(prompt.contains("5号位置（大阿尔卡纳）：心灵成长 - 关于灵魂课题和精神成长"));
    }

    #[test]
    fn test_prompts_embed_cards_text() {
        let cards = format_for_prompt(&fixed_spread());
        assert!(analysis_prompt(&cards).contains(&cards));
        assert!(insight_prompt(&cards).contains("一句话的核心洞察"));
        let advice = advice_prompt(&cards);
        assert!(advice.contains("1. 行动力建议"));
        assert!(advice.contains("5. 心灵成长建议"));
    }

    #[test]
    fn test_single_card_prompt() {
        let card = Card::reversed(Arcana::Major(MajorArcana::Tower));
        let prompt = single_card_prompt(&card, "工作会顺利吗？");
        assert!(prompt.contains("问题：工作会顺利吗？"));
        assert!(prompt.contains("抽取的牌：高塔 (逆位)"));
        assert!(prompt.contains("牌面类型：大阿尔卡纳"));
        assert!(prompt.contains("逆位状态下的特殊含义"));
    }

    #[test]
    fn test_parse_single_card_sections() {
        let text = "1. 【牌面解读】：高塔象征突变。

2. 【实用指导】: 放慢脚步，先整理计划。

3. 【核心信息】：破而后立。";
        let sections = parse_single_card_sections(text);
        assert_eq!(sections.interpretation, "高塔象征突变。");
        assert_eq!(sections.guidance, "放慢脚步，先整理计划。");
        assert_eq!(sections.key_message, "破而后立。");
    }

    #[test]
    fn test_parse_single_card_sections_repeated_calls() {
        let first = parse_single_card_sections("【核心信息】：守住节奏。");
        let second = parse_single_card_sections("【实用指导】：早点休息。");
        assert_eq!(first.key_message, "守住节奏。");
        assert_eq!(second.guidance, "早点休息。");
        assert!(second.key_message.is_empty());
    }

    #[test]
    fn test_parse_single_card_sections_without_markers() {
        let sections = parse_single_card_sections("  今天适合静心。 ");
        assert_eq!(sections.interpretation, "今天适合静心。");
        assert!(sections.guidance.is_empty());
        assert!(sections.key_message.is_empty());
    }
}
