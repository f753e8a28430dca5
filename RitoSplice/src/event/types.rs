//! Typed animation events
//!
//! Every field is optional. `None` means the field was never touched and is
//! not written, so a rendered event carries exactly the fields that were
//! set.

use crate::text::BlockName;
use crate::text::keywords::{FACE_TARGET_EVENT, PARTICLE_EVENT, SOUND_EVENT, SUBMESH_VISIBILITY_EVENT};
use crate::text::name::{format_f32, format_name_value};

/// `ParticleEventData`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleEvent {
    pub start_frame: Option<f32>,
    pub end_frame: Option<f32>,
    /// Effect key (`mEffectKey: hash`).
    pub effect_key: Option<String>,
    /// Bone the effect attaches to, written as a one-entry
    /// `mParticleEventDataPairList`.
    pub bone_name: Option<String>,
    pub is_loop: Option<bool>,
    pub is_kill_event: Option<bool>,
    pub is_detachable: Option<bool>,
}

/// `SoundEventData`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoundEvent {
    pub start_frame: Option<f32>,
    pub sound_name: Option<String>,
    pub is_loop: Option<bool>,
    pub is_self_only: Option<bool>,
}

/// `SubmeshVisibilityEventData`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmeshVisibilityEvent {
    pub start_frame: Option<f32>,
    pub end_frame: Option<f32>,
    pub show_submeshes: Option<Vec<String>>,
    pub hide_submeshes: Option<Vec<String>>,
}

/// `FaceTargetEventData`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceTargetEvent {
    pub start_frame: Option<f32>,
    pub end_frame: Option<f32>,
    pub face_target: Option<u8>,
    pub blend_in_time: Option<f32>,
    pub blend_out_time: Option<f32>,
    pub y_rotation_degrees: Option<f32>,
}

/// The data of one event, tagged by kind
#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    Particle(ParticleEvent),
    Sound(SoundEvent),
    SubmeshVisibility(SubmeshVisibilityEvent),
    FaceTarget(FaceTargetEvent),
}

impl EventData {
    /// The type keyword of this event kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            EventData::Particle(_) => PARTICLE_EVENT,
            EventData::Sound(_) => SOUND_EVENT,
            EventData::SubmeshVisibility(_) => SUBMESH_VISIBILITY_EVENT,
            EventData::FaceTarget(_) => FACE_TARGET_EVENT,
        }
    }

    /// Rendered field lines, relative to the event's own indentation.
    fn fields(&self) -> Vec<String> {
        let mut out = FieldWriter::default();
        match self {
            EventData::Particle(e) => {
                out.float("mStartFrame", e.start_frame);
                out.float("mEndFrame", e.end_frame);
                out.name("mEffectKey", "hash", e.effect_key.as_deref());
                if let Some(bone) = &e.bone_name {
                    out.raw(format!(
                        "mParticleEventDataPairList: list[embed] = {{\n    ParticleEventDataPair {{\n        mBoneName: hash = {}\n    }}\n}}",
                        format_name_value(bone)
                    ));
                }
                out.flag("mIsLoop", e.is_loop);
                out.flag("mIsKillEvent", e.is_kill_event);
                out.flag("mIsDetachable", e.is_detachable);
            }
            EventData::Sound(e) => {
                out.float("mStartFrame", e.start_frame);
                out.name("mSoundName", "string", e.sound_name.as_deref());
                out.flag("mIsLoop", e.is_loop);
                out.flag("mIsSelfOnly", e.is_self_only);
            }
            EventData::SubmeshVisibility(e) => {
                out.float("mStartFrame", e.start_frame);
                out.float("mEndFrame", e.end_frame);
                out.hash_list("mShowSubmeshList", e.show_submeshes.as_deref());
                out.hash_list("mHideSubmeshList", e.hide_submeshes.as_deref());
            }
            EventData::FaceTarget(e) => {
                out.float("mStartFrame", e.start_frame);
                out.float("mEndFrame", e.end_frame);
                if let Some(target) = e.face_target {
                    out.raw(format!("mFaceTarget: u8 = {target}"));
                }
                out.float("mBlendInTime", e.blend_in_time);
                out.float("mBlendOutTime", e.blend_out_time);
                out.float("mYRotationDegrees", e.y_rotation_degrees);
            }
        }
        out.lines
    }
}

#[derive(Default)]
struct FieldWriter {
    lines: Vec<String>,
}

impl FieldWriter {
    fn raw(&mut self, line: String) {
        self.lines.push(line);
    }

    fn float(&mut self, name: &str, value: Option<f32>) {
        if let Some(v) = value {
            self.raw(format!("{name}: f32 = {}", format_f32(v)));
        }
    }

    fn flag(&mut self, name: &str, value: Option<bool>) {
        if let Some(v) = value {
            self.raw(format!("{name}: bool = {v}"));
        }
    }

    fn name(&mut self, name: &str, ty: &str, value: Option<&str>) {
        if let Some(v) = value {
            self.raw(format!("{name}: {ty} = {}", format_name_value(v)));
        }
    }

    fn hash_list(&mut self, name: &str, values: Option<&[String]>) {
        match values {
            None => {}
            Some([]) => self.raw(format!("{name}: list[hash] = {{}}")),
            Some(values) => {
                let body: Vec<String> = values
                    .iter()
                    .map(|v| format!("    {}", format_name_value(v)))
                    .collect();
                self.raw(format!("{name}: list[hash] = {{\n{}\n}}", body.join("\n")));
            }
        }
    }
}

/// A named event ready to be written into an `mEventDataMap`
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: BlockName,
    pub data: EventData,
}

impl Event {
    pub fn new(name: BlockName, data: EventData) -> Self {
        Self { name, data }
    }

    /// The map entry text, unindented, with nested lines four spaces deep.
    ///
    /// An event with no fields set renders on one line as
    /// `<name> = <Type> {}`.
    pub fn to_entry_text(&self) -> String {
        let header = format!("{} = {}", self.name.literal(), self.data.type_name());
        let fields = self.data.fields();
        if fields.is_empty() {
            return format!("{header} {{}}");
        }

        let mut out = format!("{header} {{\n");
        for field in fields {
            for line in field.lines() {
                out.push_str("    ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push('}');
        out
    }
}
