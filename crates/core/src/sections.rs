//! Report Section Parser
//!
//! Best-effort extraction of the three named report sections from free-form
//! generated text. The generator is prompted to emit the fixed headers
//! 【镜像投射】, 【病灶溯源】 and 【宿命终局】 in that order, but is not
//! contract-bound to perfect structure, so the parser tolerates missing
//! headers, truncated mid-stream text and stray subtitle decorations. It
//! never fails; the worst case is empty sections.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Header marking the mirror-projection section
pub const MIRROR_HEADER: &str = "【镜像投射】";
/// Header marking the origin-tracing section
pub const ORIGIN_HEADER: &str = "【病灶溯源】";
/// Header marking the fatal-simulation section
pub const FATAL_HEADER: &str = "【宿命终局】";

// Each pattern is anchored on its own header, skips an optional parenthesized
// subtitle the model sometimes appends (e.g. "【镜像投射】 (The Mirror)"),
// then captures lazily up to the next header or end of text. Running the
// three independently keeps a missing header from poisoning the other two.
static MIRROR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"【镜像投射】(?:\s*[（(][^（）()\n]*[）)])?((?s:.*?))(?:【病灶溯源】|$)")
        .expect("mirror section pattern is valid")
});

static ORIGIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"【病灶溯源】(?:\s*[（(][^（）()\n]*[）)])?((?s:.*?))(?:【宿命终局】|$)")
        .expect("origin section pattern is valid")
});

static FATAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"【宿命终局】(?:\s*[（(][^（）()\n]*[）)])?((?s:.*))")
        .expect("fatal section pattern is valid")
});

/// The three named report sections, derived fresh from generated text on
/// every read. Never persisted separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMap {
    /// 【镜像投射】 body
    pub mirror: String,
    /// 【病灶溯源】 body
    pub origin: String,
    /// 【宿命终局】 body
    pub fatal_simulation: String,
}

impl SectionMap {
    /// True when all three sections are empty (no header has streamed yet).
    pub fn is_empty(&self) -> bool {
        self.mirror.is_empty() && self.origin.is_empty() && self.fatal_simulation.is_empty()
    }

    /// True when all three sections carry text.
    pub fn is_complete(&self) -> bool {
        !self.mirror.is_empty() && !self.origin.is_empty() && !self.fatal_simulation.is_empty()
    }
}

/// Extract the three report sections from raw generated text.
///
/// Safe to call on a truncated mid-stream buffer; absent headers yield empty
/// strings. When a header is duplicated the first occurrence wins.
pub fn parse(text: &str) -> SectionMap {
    SectionMap {
        mirror: extract(&MIRROR_RE, text),
        origin: extract(&ORIGIN_RE, text),
        fatal_simulation: extract(&FATAL_RE, text),
    }
}

fn extract(re: &Regex, text: &str) -> String {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WELL_FORMED: &str = "\
【镜像投射】
你站在十字路口，手里攥着别人的地图。

【病灶溯源】
地图是你母亲画的，路是你父亲堵的。

【宿命终局】
十年后，你还站在原地，只是地图换了一张。";

    #[test]
    fn test_well_formed_extraction() {
        let sections = parse(WELL_FORMED);
        assert_eq!(sections.mirror, "你站在十字路口，手里攥着别人的地图。");
        assert_eq!(sections.origin, "地图是你母亲画的，路是你父亲堵的。");
        assert_eq!(
            sections.fatal_simulation,
            "十年后，你还站在原地，只是地图换了一张。"
        );
        assert!(sections.is_complete());
    }

    #[test]
    fn test_reparse_is_idempotent() {
        assert_eq!(parse(WELL_FORMED), parse(WELL_FORMED));
    }

    #[test]
    fn test_headers_without_newlines() {
        let sections = parse("【镜像投射】X【病灶溯源】Y【宿命终局】Z");
        assert_eq!(sections.mirror, "X");
        assert_eq!(sections.origin, "Y");
        assert_eq!(sections.fatal_simulation, "Z");
    }

    #[test]
    fn test_partial_stream_truncation() {
        let sections = parse("【镜像投射】\n你在镜子里看到的不是自己，而是");
        assert_eq!(sections.mirror, "你在镜子里看到的不是自己，而是");
        assert_eq!(sections.origin, "");
        assert_eq!(sections.fatal_simulation, "");
    }

    #[test]
    fn test_missing_middle_header() {
        let sections = parse("【镜像投射】A【宿命终局】C");
        assert_eq!(sections.mirror, "A");
        assert_eq!(sections.origin, "");
        assert_eq!(sections.fatal_simulation, "C");
    }

    #[test]
    fn test_parenthesized_subtitles_are_skipped() {
        let text = "【镜像投射】（灵魂照妖镜）\nA\n【病灶溯源】 (Root Cause)\nB\n【宿命终局】（十年后）\nC";
        let sections = parse(text);
        assert_eq!(sections.mirror, "A");
        assert_eq!(sections.origin, "B");
        assert_eq!(sections.fatal_simulation, "C");
    }

    #[test]
    fn test_duplicate_header_uses_first_occurrence() {
        let text = "【镜像投射】first【病灶溯源】mid【镜像投射】second【宿命终局】end";
        let sections = parse(text);
        assert_eq!(sections.mirror, "first");
        assert_eq!(sections.origin, "mid【镜像投射】second");
        assert_eq!(sections.fatal_simulation, "end");
    }

    #[test]
    fn test_empty_and_headerless_input() {
        assert!(parse("").is_empty());
        assert!(parse("no headers at all, just prose").is_empty());
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let sections = parse("【镜像投射】   \n\n  padded  \n\n【病灶溯源】tail");
        assert_eq!(sections.mirror, "padded");
        assert_eq!(sections.origin, "tail");
    }
}
