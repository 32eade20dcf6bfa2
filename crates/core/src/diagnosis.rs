//! Family Systems Classifier
//!
//! The hard-coded psychological truth table: 4 father archetypes × 4 mother
//! archetypes → 16 fixed diagnosis records. Classification is a pure, total
//! function — every combination resolves to a record, and untyped input
//! falls back to the Unknown-Pattern sentinel instead of erroring, which
//! keeps the downstream pipeline total.

use serde::Serialize;

use crate::profile::{FatherArchetype, MotherArchetype};

/// The fixed classification derived from the parental archetype pair.
///
/// Recomputed on demand, never stored independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiagnosisRecord {
    /// Diagnosis name, Chinese (e.g. "悲剧拯救者")
    pub title: &'static str,
    /// English rendering (e.g. "The Tragic Rescuer")
    pub title_translated: &'static str,
    /// Clinical mechanism label (e.g. "Triangulation (卡普曼三角)")
    pub mechanism_label: &'static str,
    /// Concrete dynamic description of the family system
    pub dynamic_description: &'static str,
}

/// Sentinel returned for combinations outside the known enumeration.
pub const UNKNOWN_PATTERN: DiagnosisRecord = DiagnosisRecord {
    title: "未知组合",
    title_translated: "Unknown Pattern",
    mechanism_label: "Complex Interaction",
    dynamic_description: "你的家庭呈现出一种独特的混合态，无法用单一模式定义。",
};

/// Classify a parental archetype pair.
///
/// Total by construction: the exhaustive match guarantees every typed
/// combination resolves to a fixed record.
pub fn classify(father: FatherArchetype, mother: MotherArchetype) -> &'static DiagnosisRecord {
    use FatherArchetype as F;
    use MotherArchetype as M;

    match (father, mother) {
        // Father: Absent (影子父亲)
        (F::Absent, M::Engulfing) => &DiagnosisRecord {
            title: "情感配偶",
            title_translated: "The Surrogate Spouse",
            mechanism_label: "Spousification (配偶化/情绪乱伦)",
            dynamic_description: "父亲的缺席留下了权力的真空，母亲不仅是母亲，还是你情感的寄生者。你被迫填补了父亲的位置，成为了母亲的\"小丈夫\"或\"情绪伴侣\"。这种过度的亲密让你在成年后对亲密关系感到窒息。",
        },
        (F::Absent, M::Anxious) => &DiagnosisRecord {
            title: "早熟家长",
            title_translated: "The Parentified Child",
            mechanism_label: "Parentification (亲职化)",
            dynamic_description: "家里没有大人。父亲不在，母亲在恐慌。你必须迅速长大，不仅要照顾自己，还要安抚情绪不稳定的母亲。你失去了童年，因为你不敢当个孩子。",
        },
        (F::Absent, M::Victim) => &DiagnosisRecord {
            title: "孤独支柱",
            title_translated: "The Lonely Pillar",
            mechanism_label: "Neglect & Burden (忽视与重担)",
            dynamic_description: "父亲逃跑了，留下一地鸡毛和哭泣的母亲。你不得不独自撑起这个家，既要提供物质支持，又要提供情绪价值，却无人看见你的疲惫。",
        },
        (F::Absent, M::Secure) => &DiagnosisRecord {
            title: "单翼天使",
            title_translated: "The One-Winged",
            mechanism_label: "Partial Deprivation (部分缺失)",
            dynamic_description: "母亲尽力给了你安全感，但父亲的缺席让你对男性权威和外部世界感到陌生。你可能在亲密关系中独立，但在社会竞争中缺乏底气。",
        },

        // Father: Dictator (暴君父亲)
        (F::Dictator, M::Engulfing) => &DiagnosisRecord {
            title: "完美囚徒",
            title_translated: "The Perfect Prisoner",
            mechanism_label: "Double Bind (双重束缚)",
            dynamic_description: "这也是控制，那也是控制。父亲控制你的行为，母亲控制你的感受。你学会了像机器一样精准地执行指令，甚至学会了\"读心术\"，因为任何错误都会招致毁灭。",
        },
        (F::Dictator, M::Anxious) => &DiagnosisRecord {
            title: "惊弓之鸟",
            title_translated: "The Walking Radar",
            mechanism_label: "Hyper-vigilance (过度警觉)",
            dynamic_description: "父亲的暴怒和母亲的惊恐交织在一起。你变成了家里的\"情绪雷达\"，能从开门的声音判断今天的安全等级。你的神经系统永远处于战备状态。",
        },
        (F::Dictator, M::Victim) => &DiagnosisRecord {
            title: "悲剧拯救者",
            title_translated: "The Tragic Rescuer",
            mechanism_label: "Triangulation (卡普曼三角)",
            dynamic_description: "典型的戏剧三角：父亲是迫害者，母亲是受害者，而你被迫成为了拯救者。你憎恨强权，却又对\"软弱的人\"产生病态的责任感。你的一生都在试图拯救那些像你母亲一样无法自立的人。",
        },
        (F::Dictator, M::Secure) => &DiagnosisRecord {
            title: "被压抑的叛逆者",
            title_translated: "The Suppressed Rebel",
            mechanism_label: "Authority Conflict (权威冲突)",
            dynamic_description: "母亲的稳定给了你反抗的底气，但父亲的压制让你对权威充满敌意。你可能在表面顺从，内心却在策划一场永恒的起义。",
        },

        // Father: Weak (无力父亲)
        (F::Weak, M::Engulfing) => &DiagnosisRecord {
            title: "被吞噬的王",
            title_translated: "The Crownless King",
            mechanism_label: "Enmeshment (共生纠缠)",
            dynamic_description: "母亲看不起父亲，于是联合你组成同盟来鄙视父亲。你获得了虚假的家庭地位（比父亲高），但内心深处极度缺乏安全感，因为你击败了自己的父亲。",
        },
        (F::Weak, M::Anxious) => &DiagnosisRecord {
            title: "不安的守护者",
            title_translated: "The Anxious Guardian",
            mechanism_label: "Role Confusion (角色混乱)",
            dynamic_description: "父亲无法保护家庭，母亲陷入焦虑。你被迫成为家庭的\"稳定器\"，但你自己也只是个孩子。你学会了隐藏恐惧，假装强大。",
        },
        (F::Weak, M::Victim) => &DiagnosisRecord {
            title: "双重孤儿",
            title_translated: "The Double Orphan",
            mechanism_label: "Abandonment (双重遗弃)",
            dynamic_description: "父亲软弱到无法履行职责，母亲沉浸在受害者角色中。你在这个家里是个孤儿，既没有父亲的保护，也没有母亲的滋养。你学会了不依赖任何人。",
        },
        (F::Weak, M::Secure) => &DiagnosisRecord {
            title: "温柔的继承者",
            title_translated: "The Gentle Heir",
            mechanism_label: "Compassion Learning (同理心习得)",
            dynamic_description: "父亲虽然软弱，但不邪恶。母亲稳定包容。你学会了用温和而非暴力解决问题，但可能在需要强硬时显得过于柔软。",
        },

        // Father: Secure (灯塔父亲)
        (F::Secure, M::Engulfing) => &DiagnosisRecord {
            title: "金色牢笼",
            title_translated: "The Golden Cage",
            mechanism_label: "Maternal Enmeshment (母性吞噬)",
            dynamic_description: "父亲稳定但母亲过度介入。你在物质和安全上无忧，但母亲的控制让你无法真正独立。你像个被过度保护的太子，缺乏真实世界的生存能力。",
        },
        (F::Secure, M::Anxious) => &DiagnosisRecord {
            title: "矛盾的根基",
            title_translated: "The Contradicted Foundation",
            mechanism_label: "Parental Contrast (父母对比)",
            dynamic_description: "父亲稳如磐石，母亲飘忽不定。你不知道该相信稳定还是准备随时应对危机。你内在的安全感和焦虑在不断拉扯。",
        },
        (F::Secure, M::Victim) => &DiagnosisRecord {
            title: "无辜的调解者",
            title_translated: "The Innocent Mediator",
            mechanism_label: "Parentification Lite (轻度亲职化)",
            dynamic_description: "父亲稳定但母亲总是受伤。你虽然有父亲的保护，但仍然忍不住想去\"拯救\"母亲。你可能成为了家庭的情绪翻译官。",
        },
        (F::Secure, M::Secure) => &DiagnosisRecord {
            title: "幸运的少数",
            title_translated: "The Fortunate Few",
            mechanism_label: "Secure Attachment (安全依恋)",
            dynamic_description: "你是极少数的幸运儿。父母双方都相对稳定，给了你足够的自由和支持。你的创伤可能来自其他地方（社会、同伴、意外），而非原生家庭。",
        },
    }
}

/// Classify from untyped archetype keys (e.g. profile rows written by an
/// older client). Unknown keys resolve to [`UNKNOWN_PATTERN`] — never an
/// error.
pub fn classify_raw(father: &str, mother: &str) -> &'static DiagnosisRecord {
    match (
        FatherArchetype::parse_key(father),
        MotherArchetype::parse_key(mother),
    ) {
        (Some(f), Some(m)) => classify(f, m),
        _ => &UNKNOWN_PATTERN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FATHERS: [FatherArchetype; 4] = [
        FatherArchetype::Absent,
        FatherArchetype::Dictator,
        FatherArchetype::Weak,
        FatherArchetype::Secure,
    ];
    const MOTHERS: [MotherArchetype; 4] = [
        MotherArchetype::Engulfing,
        MotherArchetype::Anxious,
        MotherArchetype::Victim,
        MotherArchetype::Secure,
    ];

    #[test]
    fn test_all_sixteen_combinations_are_non_sentinel() {
        for father in FATHERS {
            for mother in MOTHERS {
                let record = classify(father, mother);
                assert_ne!(record.title_translated, UNKNOWN_PATTERN.title_translated);
                assert!(!record.title.is_empty());
                assert!(!record.dynamic_description.is_empty());
            }
        }
    }

    #[test]
    fn test_all_sixteen_titles_are_distinct() {
        let mut titles = Vec::new();
        for father in FATHERS {
            for mother in MOTHERS {
                titles.push(classify(father, mother).title);
            }
        }
        titles.sort();
        titles.dedup();
        assert_eq!(titles.len(), 16);
    }

    #[test]
    fn test_dictator_victim_is_tragic_rescuer() {
        let record = classify(FatherArchetype::Dictator, MotherArchetype::Victim);
        assert_eq!(record.title, "悲剧拯救者");
        assert_eq!(record.title_translated, "The Tragic Rescuer");
        assert_eq!(record.mechanism_label, "Triangulation (卡普曼三角)");
    }

    #[test]
    fn test_raw_classification_matches_typed() {
        let typed = classify(FatherArchetype::Absent, MotherArchetype::Anxious);
        let raw = classify_raw("Absent", "anxious");
        assert_eq!(typed, raw);
    }

    #[test]
    fn test_unknown_keys_fall_back_to_sentinel() {
        assert_eq!(classify_raw("Stepfather", "Victim"), &UNKNOWN_PATTERN);
        assert_eq!(classify_raw("Dictator", ""), &UNKNOWN_PATTERN);
        assert_eq!(classify_raw("", ""), &UNKNOWN_PATTERN);
    }
}
