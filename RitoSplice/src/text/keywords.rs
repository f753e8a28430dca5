//! Type keywords and property names the editors anchor on

// Clip types
pub const ATOMIC_CLIP: &str = "AtomicClipData";
pub const SEQUENCER_CLIP: &str = "SequencerClipData";
pub const SELECTOR_CLIP: &str = "SelectorClipData";
pub const PARAMETRIC_CLIP: &str = "ParametricClipData";
pub const CONDITION_FLOAT_CLIP: &str = "ConditionFloatClipData";

/// Every clip type keyword, in the order the locator tries them.
pub const CLIP_TYPES: [&str; 5] = [
    ATOMIC_CLIP,
    SEQUENCER_CLIP,
    SELECTOR_CLIP,
    PARAMETRIC_CLIP,
    CONDITION_FLOAT_CLIP,
];

// Other block types
pub const TRACK_DATA: &str = "TrackData";
pub const MASK_DATA: &str = "MaskData";
pub const VFX_SYSTEM: &str = "VfxSystemDefinitionData";
pub const TRANSITION_CLIP_BLEND: &str = "TransitionClipBlendData";
pub const ANIMATION_RESOURCE: &str = "AnimationResourceData";
pub const SELECTOR_PAIR: &str = "SelectorPairData";
pub const CONDITION_FLOAT_PAIR: &str = "ConditionFloatPairData";

// Event types
pub const PARTICLE_EVENT: &str = "ParticleEventData";
pub const SOUND_EVENT: &str = "SoundEventData";
pub const SUBMESH_VISIBILITY_EVENT: &str = "SubmeshVisibilityEventData";
pub const FACE_TARGET_EVENT: &str = "FaceTargetEventData";

/// Every event type keyword.
pub const EVENT_TYPES: [&str; 4] = [
    PARTICLE_EVENT,
    SOUND_EVENT,
    SUBMESH_VISIBILITY_EVENT,
    FACE_TARGET_EVENT,
];

// Properties
pub const EVENT_DATA_MAP: &str = "mEventDataMap";
pub const CLIP_NAME_LIST: &str = "mClipNameList";
pub const SELECTOR_PAIR_LIST: &str = "mSelectorPairDataList";
pub const CONDITION_FLOAT_PAIR_LIST: &str = "mConditionFloatPairDataList";
pub const CLIP_DATA_MAP: &str = "mClipDataMap";
pub const TRACK_DATA_MAP: &str = "mTrackDataMap";
pub const MASK_DATA_MAP: &str = "mMaskDataMap";
pub const ENTRIES_MAP: &str = "entries";
pub const TRACK_DATA_NAME: &str = "mTrackDataName";
pub const MASK_DATA_NAME: &str = "mMaskDataName";
pub const ANIMATION_FILE_PATH: &str = "mAnimationFilePath";
pub const ANIMATION_RESOURCE_DATA: &str = "mAnimationResourceData";
pub const CLIP_NAME: &str = "mClipName";
pub const PRIORITY: &str = "mPriority";
pub const BLEND_MODE: &str = "mBlendMode";
pub const BLEND_WEIGHT: &str = "mBlendWeight";
pub const WEIGHT_LIST: &str = "mWeightList";
