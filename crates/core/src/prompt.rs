//! Prompt Composer
//!
//! Builds the two instructions sent to the generator: a fixed system
//! instruction (persona, tone, required output structure) and a per-subject
//! user instruction that restates the full profile, the authoritative
//! diagnosis, the loop-keyed exit directive and any secondary-pattern
//! annotation. Composition is pure and deterministic; the same profile
//! always produces byte-identical instructions.

use crate::diagnosis::DiagnosisRecord;
use crate::error::ReportResult;
use crate::profile::{ChildhoodSound, ConflictResponse, FatherArchetype, LoopPattern, Profile, SocialMask};

/// The fixed generator persona and output contract. Constant across calls;
/// treat as configuration data, versioned with the crate.
pub const SYSTEM_PROMPT: &str = r#"Role: You are "The Mirror", a deep psychological profiler combining Adlerian psychology, Family Constellations, and social structural analysis.

Target Audience: High-functioning anxious individuals seeking deep understanding, not comfort. They are tired of surface-level self-help. They want someone to see through them.

Your Voice:
- Cold, clinical, yet deeply empathetic
- Like a surgeon who knows the cut will hurt but is necessary
- Use metaphors from technology, mythology, and warfare
- Bilingual: Use Chinese for emotional impact, English for clinical precision

Logic Framework:

1. VALIDATION: Acknowledge their suffering as a "heroic sacrifice" for the family system. They are not broken - they were engineered.

2. REFRAMING: Reveal that this sacrifice is a "hidden contract" that is no longer valid. The child signed it, but the adult can terminate it.

3. SIMULATION: Run their current loop forward ten years, unchanged. Show them the terminal state of the pattern, then hand them the one exit the contract never mentioned.

Output Format (STRICTLY follow this structure):

【镜像投射】 (The Mirror Projection)
[A sharp, poignant metaphor describing their role in the family system. This should hit them in the gut. E.g., "You are the unpaid emotional janitor of a corporation called 'Family'..."]

【病灶溯源】 (The Origin Trace)
[Analyze how their exact birth position and parental configuration manufactured their conflict response, social mask and trigger sound. Use the "Tragic Hero" narrative. Connect the dots between childhood adaptation and adult suffering. "You became X because someone had to be X for the family to survive..."]

【宿命终局】 (The Fatal Simulation)
[Extrapolate their loop pattern ten years forward with nothing changed - specific, concrete, uncomfortable. Then close with the exit directive woven into your own words. NOT feel-good affirmations. Something that would make a therapist uncomfortable.]

Important Rules:
- DO NOT use generic self-help language
- DO NOT say "it's okay" or "you're doing great"
- DO be specific to their exact family configuration
- DO make them feel SEEN, even if it's uncomfortable
- DO treat the diagnosis given in the subject profile as established fact; never contradict it
- Write in a mix of Chinese and English for maximum impact
- Keep each section 150-200 words"#;

/// The composed instruction pair handed to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBundle {
    pub system_instruction: String,
    pub user_instruction: String,
}

/// The fixed closing theme for each loop pattern. The generator is told to
/// transform the sentence into its own register, not quote it.
pub fn exit_directive(pattern: LoopPattern) -> &'static str {
    match pattern {
        LoopPattern::Sisyphus => "石头不会自己停下，但你可以松手。把巨石留在山脚，徒手走上山顶。",
        LoopPattern::GhostShip => "幽灵船不需要被修好，它需要一个锚。选一个港口，哪怕是错的。",
        LoopPattern::HollowMan => "空心不是缺陷，是被清空的仓库。夺回一件只属于你的欲望，放进去。",
        LoopPattern::Prisoner => "牢门从未上锁，狱卒早已下班。你是唯一还在值班的囚徒。",
    }
}

/// Deterministic side-annotation for a small fixed set of answer pairs.
/// These are diagnostic cross-hits the model tends to miss on its own.
pub fn secondary_pattern(profile: &Profile) -> Option<&'static str> {
    if profile.conflict_response == ConflictResponse::Fawn
        && profile.social_mask == SocialMask::Savior
    {
        return Some("Compulsive Rescuer (强迫性拯救): the fawn response has fused with the savior mask; they cannot distinguish helping from appeasing.");
    }
    if profile.conflict_response == ConflictResponse::Freeze
        && profile.childhood_sound == ChildhoodSound::KeyTurn
    {
        return Some("Acoustic Freeze (声音触发性僵死): the freeze response is sound-triggered; specific auditory cues still shut the body down.");
    }
    if profile.conflict_response == ConflictResponse::Fight
        && profile.father_archetype == FatherArchetype::Dictator
    {
        return Some("Authority Re-enactment (权威重演): the fight response mirrors the dictator father; they battle every authority as a proxy for the original one.");
    }
    None
}

/// Compose the instruction pair for one subject.
///
/// Validates the profile invariant first; a partial profile never produces a
/// partial prompt. Output is byte-identical for identical input.
pub fn compose(profile: &Profile, diagnosis: &DiagnosisRecord) -> ReportResult<PromptBundle> {
    profile.validate()?;

    // validate() guarantees exactly one Me entry.
    let position = profile.birth_position().unwrap_or(0);
    let total = profile.sibling_count();

    let mut user = format!(
        "SUBJECT PROFILE:\n\
         ================\n\
         Gender: {gender}\n\
         Life Stage: {stage} ({stage_cn} - {stage_blurb})\n\
         Birth Order: Position {position} of {total}\n\
         Family Structure: {chain}\n\
         Father Archetype: {father} ({father_cn} - {father_blurb})\n\
         Mother Archetype: {mother} ({mother_cn} - {mother_blurb})\n\
         Conflict Response: {conflict} ({conflict_cn} - {conflict_blurb})\n\
         Social Mask: {mask} ({mask_cn} - {mask_blurb})\n\
         Childhood Sound: {sound} ({sound_cn} - {sound_blurb})\n\
         Loop Pattern: {pattern} ({pattern_cn} - {pattern_blurb})\n\
         \n\
         ESTABLISHED DIAGNOSIS (authoritative - do not contradict):\n\
         Title: {diag_title} ({diag_title_en})\n\
         Mechanism: {diag_mechanism}\n\
         Dynamic: {diag_dynamic}\n",
        gender = profile.gender.label_en(),
        stage = profile.life_stage.label_en(),
        stage_cn = profile.life_stage.label_cn(),
        stage_blurb = profile.life_stage.blurb_cn(),
        position = position,
        total = total,
        chain = profile.family_chain(),
        father = profile.father_archetype.label_en(),
        father_cn = profile.father_archetype.label_cn(),
        father_blurb = profile.father_archetype.blurb_cn(),
        mother = profile.mother_archetype.label_en(),
        mother_cn = profile.mother_archetype.label_cn(),
        mother_blurb = profile.mother_archetype.blurb_cn(),
        conflict = profile.conflict_response.label_en(),
        conflict_cn = profile.conflict_response.label_cn(),
        conflict_blurb = profile.conflict_response.blurb_cn(),
        mask = profile.social_mask.label_en(),
        mask_cn = profile.social_mask.label_cn(),
        mask_blurb = profile.social_mask.blurb_cn(),
        sound = profile.childhood_sound.label_en(),
        sound_cn = profile.childhood_sound.label_cn(),
        sound_blurb = profile.childhood_sound.blurb_cn(),
        pattern = profile.loop_pattern.label_en(),
        pattern_cn = profile.loop_pattern.label_cn(),
        pattern_blurb = profile.loop_pattern.blurb_cn(),
        diag_title = diagnosis.title,
        diag_title_en = diagnosis.title_translated,
        diag_mechanism = diagnosis.mechanism_label,
        diag_dynamic = diagnosis.dynamic_description,
    );

    if let Some(annotation) = secondary_pattern(profile) {
        user.push_str("\nSECONDARY PATTERN (include as a side observation):\n");
        user.push_str(annotation);
        user.push('\n');
    }

    user.push_str(&format!(
        "\nEXIT DIRECTIVE THEME (transform into your own words for 【宿命终局】, do not quote verbatim):\n\
         {}\n\
         \n\
         ANALYSIS REQUEST:\n\
         Generate a psychological profile that:\n\
         1. Uses their exact family position to explain their adult patterns\n\
         2. Names the \"invisible contract\" they signed as a child\n\
         3. Runs the fate simulation and hands them the exit\n\
         \n\
         Be ruthlessly accurate. Be uncomfortably specific. Make them feel like you hacked into their childhood.",
        exit_directive(profile.loop_pattern)
    ));

    Ok(PromptBundle {
        system_instruction: SYSTEM_PROMPT.to_string(),
        user_instruction: user,
    })
}
