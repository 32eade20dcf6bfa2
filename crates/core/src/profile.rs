//! Subject Profile Model
//!
//! The nine closed questionnaire answers that describe one subject, plus the
//! `Profile` aggregate and its validity invariant. Wire representations match
//! the original questionnaire strings (`"High Pressure (26-35)"`,
//! `"Older Brother"`, ...) so stored profiles stay readable across versions.
//!
//! Every enum exposes its bilingual presentation metadata (`label_en`,
//! `label_cn`, `blurb_cn`) because the prompt composer embeds it verbatim.

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

/// Biological gender of the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label_en(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn label_cn(&self) -> &'static str {
        match self {
            Gender::Male => "男性",
            Gender::Female => "女性",
        }
    }
}

/// Where the subject sits in the arc of adult life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeStage {
    #[serde(rename = "Lost (18-25)")]
    Lost,
    #[serde(rename = "High Pressure (26-35)")]
    HighPressure,
    #[serde(rename = "Disillusioned (36-45)")]
    Disillusioned,
    #[serde(rename = "Reconciled (45+)")]
    Reconciled,
}

impl LifeStage {
    pub fn label_en(&self) -> &'static str {
        match self {
            LifeStage::Lost => "Lost (18-25)",
            LifeStage::HighPressure => "High Pressure (26-35)",
            LifeStage::Disillusioned => "Disillusioned (36-45)",
            LifeStage::Reconciled => "Reconciled (45+)",
        }
    }

    pub fn label_cn(&self) -> &'static str {
        match self {
            LifeStage::Lost => "迷失期 (18-25)",
            LifeStage::HighPressure => "高压期 (26-35)",
            LifeStage::Disillusioned => "幻灭期 (36-45)",
            LifeStage::Reconciled => "和解期 (45+)",
        }
    }

    pub fn blurb_cn(&self) -> &'static str {
        match self {
            LifeStage::Lost => "身份探索，不知道自己是谁",
            LifeStage::HighPressure => "事业冲刺，社会时钟的奴隶",
            LifeStage::Disillusioned => "中年危机，质疑一切选择",
            LifeStage::Reconciled => "寻求意义，与过去握手言和",
        }
    }
}

/// One slot in the sibling sequence, ordered by birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FamilyRole {
    #[serde(rename = "Older Brother")]
    OlderBrother,
    #[serde(rename = "Older Sister")]
    OlderSister,
    Me,
    #[serde(rename = "Younger Brother")]
    YoungerBrother,
    #[serde(rename = "Younger Sister")]
    YoungerSister,
}

impl FamilyRole {
    pub fn label_en(&self) -> &'static str {
        match self {
            FamilyRole::OlderBrother => "Older Brother",
            FamilyRole::OlderSister => "Older Sister",
            FamilyRole::Me => "Me",
            FamilyRole::YoungerBrother => "Younger Brother",
            FamilyRole::YoungerSister => "Younger Sister",
        }
    }

    pub fn label_cn(&self) -> &'static str {
        match self {
            FamilyRole::OlderBrother => "哥哥",
            FamilyRole::OlderSister => "姐姐",
            FamilyRole::Me => "我",
            FamilyRole::YoungerBrother => "弟弟",
            FamilyRole::YoungerSister => "妹妹",
        }
    }
}

/// Father archetype — authority, career, self-worth (the super-ego axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FatherArchetype {
    Absent,
    Dictator,
    Weak,
    Secure,
}

impl FatherArchetype {
    pub fn label_en(&self) -> &'static str {
        match self {
            FatherArchetype::Absent => "Absent",
            FatherArchetype::Dictator => "Dictator",
            FatherArchetype::Weak => "Weak",
            FatherArchetype::Secure => "Secure",
        }
    }

    pub fn label_cn(&self) -> &'static str {
        match self {
            FatherArchetype::Absent => "影子父亲",
            FatherArchetype::Dictator => "暴君父亲",
            FatherArchetype::Weak => "无力父亲",
            FatherArchetype::Secure => "灯塔父亲",
        }
    }

    pub fn blurb_cn(&self) -> &'static str {
        match self {
            FatherArchetype::Absent => "物理或情感上的长期缺席",
            FatherArchetype::Dictator => "控制、暴怒、说一不二",
            FatherArchetype::Weak => "在场却无力，无法提供保护",
            FatherArchetype::Secure => "稳定可靠的后盾",
        }
    }

    /// Resolve an untyped archetype key (case-insensitive). Returns `None`
    /// for anything outside the enumeration.
    pub fn parse_key(key: &str) -> Option<Self> {
        let key = key.trim();
        [
            FatherArchetype::Absent,
            FatherArchetype::Dictator,
            FatherArchetype::Weak,
            FatherArchetype::Secure,
        ]
        .into_iter()
        .find(|a| a.label_en().eq_ignore_ascii_case(key))
    }
}

/// Mother archetype — intimacy, safety, emotion (the id axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotherArchetype {
    Engulfing,
    Anxious,
    Victim,
    Secure,
}

impl MotherArchetype {
    pub fn label_en(&self) -> &'static str {
        match self {
            MotherArchetype::Engulfing => "Engulfing",
            MotherArchetype::Anxious => "Anxious",
            MotherArchetype::Victim => "Victim",
            MotherArchetype::Secure => "Secure",
        }
    }

    pub fn label_cn(&self) -> &'static str {
        match self {
            MotherArchetype::Engulfing => "吞噬型母亲",
            MotherArchetype::Anxious => "焦虑型母亲",
            MotherArchetype::Victim => "受害者母亲",
            MotherArchetype::Secure => "安全型母亲",
        }
    }

    pub fn blurb_cn(&self) -> &'static str {
        match self {
            MotherArchetype::Engulfing => "过度介入，情感绑架",
            MotherArchetype::Anxious => "情绪不稳，灾难化一切",
            MotherArchetype::Victim => "以受伤换取忠诚",
            MotherArchetype::Secure => "稳定包容的滋养",
        }
    }

    /// Resolve an untyped archetype key (case-insensitive). Returns `None`
    /// for anything outside the enumeration.
    pub fn parse_key(key: &str) -> Option<Self> {
        let key = key.trim();
        [
            MotherArchetype::Engulfing,
            MotherArchetype::Anxious,
            MotherArchetype::Victim,
            MotherArchetype::Secure,
        ]
        .into_iter()
        .find(|a| a.label_en().eq_ignore_ascii_case(key))
    }
}

/// How the subject's nervous system answers conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictResponse {
    Fawn,
    Freeze,
    Fight,
    Flight,
}

impl ConflictResponse {
    pub fn label_en(&self) -> &'static str {
        match self {
            ConflictResponse::Fawn => "Fawn",
            ConflictResponse::Freeze => "Freeze",
            ConflictResponse::Fight => "Fight",
            ConflictResponse::Flight => "Flight",
        }
    }

    pub fn label_cn(&self) -> &'static str {
        match self {
            ConflictResponse::Fawn => "讨好",
            ConflictResponse::Freeze => "僵死",
            ConflictResponse::Fight => "战斗",
            ConflictResponse::Flight => "逃离",
        }
    }

    pub fn blurb_cn(&self) -> &'static str {
        match self {
            ConflictResponse::Fawn => "率先道歉，息事宁人",
            ConflictResponse::Freeze => "大脑空白，原地静止",
            ConflictResponse::Fight => "针锋相对，寸步不让",
            ConflictResponse::Flight => "转身离开，物理消失",
        }
    }
}

/// The persona the subject shows the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SocialMask {
    Savior,
    Clown,
    Perfectionist,
    Rebel,
}

impl SocialMask {
    pub fn label_en(&self) -> &'static str {
        match self {
            SocialMask::Savior => "Savior",
            SocialMask::Clown => "Clown",
            SocialMask::Perfectionist => "Perfectionist",
            SocialMask::Rebel => "Rebel",
        }
    }

    pub fn label_cn(&self) -> &'static str {
        match self {
            SocialMask::Savior => "拯救者",
            SocialMask::Clown => "小丑",
            SocialMask::Perfectionist => "完美主义者",
            SocialMask::Rebel => "叛逆者",
        }
    }

    pub fn blurb_cn(&self) -> &'static str {
        match self {
            SocialMask::Savior => "谁有难处都找你",
            SocialMask::Clown => "用笑声稀释紧张",
            SocialMask::Perfectionist => "不许自己出错",
            SocialMask::Rebel => "用对抗确认存在",
        }
    }
}

/// The sound that still makes the subject's nervous system brace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChildhoodSound {
    Silence,
    Sigh,
    #[serde(rename = "Key Turn")]
    KeyTurn,
    Argument,
}

impl ChildhoodSound {
    pub fn label_en(&self) -> &'static str {
        match self {
            ChildhoodSound::Silence => "Silence",
            ChildhoodSound::Sigh => "Sigh",
            ChildhoodSound::KeyTurn => "Key Turn",
            ChildhoodSound::Argument => "Argument",
        }
    }

    pub fn label_cn(&self) -> &'static str {
        match self {
            ChildhoodSound::Silence => "死寂",
            ChildhoodSound::Sigh => "叹息",
            ChildhoodSound::KeyTurn => "钥匙转动声",
            ChildhoodSound::Argument => "争吵",
        }
    }

    pub fn blurb_cn(&self) -> &'static str {
        match self {
            ChildhoodSound::Silence => "可以听见钟表走动的安静",
            ChildhoodSound::Sigh => "压在胸口的那一口气",
            ChildhoodSound::KeyTurn => "门锁一响，全身戒备",
            ChildhoodSound::Argument => "隔着墙也躲不开的声浪",
        }
    }
}

/// The psychological loop the subject reports being trapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoopPattern {
    Sisyphus,
    #[serde(rename = "Ghost Ship")]
    GhostShip,
    #[serde(rename = "Hollow Man")]
    HollowMan,
    Prisoner,
}

impl LoopPattern {
    pub fn label_en(&self) -> &'static str {
        match self {
            LoopPattern::Sisyphus => "Sisyphus",
            LoopPattern::GhostShip => "Ghost Ship",
            LoopPattern::HollowMan => "Hollow Man",
            LoopPattern::Prisoner => "Prisoner",
        }
    }

    pub fn label_cn(&self) -> &'static str {
        match self {
            LoopPattern::Sisyphus => "西西弗斯",
            LoopPattern::GhostShip => "幽灵船",
            LoopPattern::HollowMan => "空心人",
            LoopPattern::Prisoner => "囚徒",
        }
    }

    pub fn blurb_cn(&self) -> &'static str {
        match self {
            LoopPattern::Sisyphus => "拼命努力，然后亲手推翻重来",
            LoopPattern::GhostShip => "随波漂流，没有目的地",
            LoopPattern::HollowMan => "角色扮演得很好，里面没有人",
            LoopPattern::Prisoner => "清楚牢门在哪，却不敢推开",
        }
    }
}

/// The complete questionnaire answer set for one subject.
///
/// A `Profile` is only valid once every field is set and `siblings` contains
/// exactly one [`FamilyRole::Me`]; partial profiles must never reach the
/// classifier or the prompt composer. Construction from untrusted JSON goes
/// through serde (which already rejects missing fields) followed by
/// [`Profile::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub gender: Gender,
    pub life_stage: LifeStage,
    /// Ordered by birth, oldest first. Exactly one entry is `Me`.
    pub siblings: Vec<FamilyRole>,
    pub father_archetype: FatherArchetype,
    pub mother_archetype: MotherArchetype,
    pub conflict_response: ConflictResponse,
    pub social_mask: SocialMask,
    pub childhood_sound: ChildhoodSound,
    pub loop_pattern: LoopPattern,
}

impl Profile {
    /// Check the profile invariant: a non-empty sibling sequence with exactly
    /// one `Me` entry.
    pub fn validate(&self) -> ReportResult<()> {
        if self.siblings.is_empty() {
            return Err(ReportError::invalid_profile("siblings must not be empty"));
        }
        let me_count = self
            .siblings
            .iter()
            .filter(|r| **r == FamilyRole::Me)
            .count();
        if me_count != 1 {
            return Err(ReportError::invalid_profile(format!(
                "siblings must contain exactly one 'Me' entry, found {}",
                me_count
            )));
        }
        Ok(())
    }

    /// 1-based birth position of the subject, if present.
    pub fn birth_position(&self) -> Option<usize> {
        self.siblings
            .iter()
            .position(|r| *r == FamilyRole::Me)
            .map(|i| i + 1)
    }

    /// Total number of children in the family, subject included.
    pub fn sibling_count(&self) -> usize {
        self.siblings.len()
    }

    /// Render the sibling sequence as a birth-order chain, marking the
    /// subject's slot: `Older Brother → [ME - Position 2]`.
    pub fn family_chain(&self) -> String {
        self.siblings
            .iter()
            .enumerate()
            .map(|(idx, role)| {
                if *role == FamilyRole::Me {
                    format!("[ME - Position {}]", idx + 1)
                } else {
                    role.label_en().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_profile() -> Profile {
        Profile {
            gender: Gender::Female,
            life_stage: LifeStage::HighPressure,
            siblings: vec![FamilyRole::OlderBrother, FamilyRole::Me],
            father_archetype: FatherArchetype::Dictator,
            mother_archetype: MotherArchetype::Victim,
            conflict_response: ConflictResponse::Fawn,
            social_mask: SocialMask::Savior,
            childhood_sound: ChildhoodSound::Argument,
            loop_pattern: LoopPattern::Prisoner,
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(valid_profile().validate().is_ok());
        assert_eq!(valid_profile().birth_position(), Some(2));
        assert_eq!(valid_profile().sibling_count(), 2);
    }

    #[test]
    fn test_no_me_fails() {
        let mut profile = valid_profile();
        profile.siblings = vec![FamilyRole::OlderBrother, FamilyRole::YoungerSister];
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("exactly one 'Me'"));
    }

    #[test]
    fn test_two_me_fails() {
        let mut profile = valid_profile();
        profile.siblings = vec![FamilyRole::Me, FamilyRole::Me];
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_empty_siblings_fails() {
        let mut profile = valid_profile();
        profile.siblings = vec![];
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_family_chain_rendering() {
        let profile = valid_profile();
        assert_eq!(profile.family_chain(), "Older Brother → [ME - Position 2]");
    }

    #[test]
    fn test_wire_format_round_trip() {
        let profile = valid_profile();
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains("\"High Pressure (26-35)\""));
        assert!(json.contains("\"Older Brother\""));
        assert!(json.contains("\"lifeStage\""));
        assert!(json.contains("\"fatherArchetype\""));

        let parsed: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile, parsed);
    }

    #[test]
    fn test_missing_field_rejected_by_serde() {
        // A partial profile (no loopPattern) must not deserialize.
        let json = r#"{
            "gender": "Female",
            "lifeStage": "Lost (18-25)",
            "siblings": ["Me"],
            "fatherArchetype": "Absent",
            "motherArchetype": "Secure",
            "conflictResponse": "Flight",
            "socialMask": "Clown",
            "childhoodSound": "Sigh"
        }"#;
        assert!(serde_json::from_str::<Profile>(json).is_err());
    }

    #[test]
    fn test_archetype_key_parsing() {
        assert_eq!(
            FatherArchetype::parse_key("dictator"),
            Some(FatherArchetype::Dictator)
        );
        assert_eq!(
            MotherArchetype::parse_key(" Victim "),
            Some(MotherArchetype::Victim)
        );
        assert_eq!(FatherArchetype::parse_key("Stepfather"), None);
    }
}
