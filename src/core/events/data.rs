//=========================================================================
// Event Record
//=========================================================================
//
// Immutable description of "something happened" routed by the dispatcher.
//
// Identity:
//   (sender, category, action) → EventKey → dedup within one tick
//
// Parameters are carried along for the handler but never take part in
// equality or hashing, so two events that differ only in parameters are
// duplicates of each other.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::hash::{Hash, Hasher};

//=== Internal Dependencies ===============================================

use super::error::{EventError, HandlerError};

//=== ActorId =============================================================

/// Stable identity of a scene actor; used as event sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

//=== EventCategory =======================================================

/// Coarse routing key. Subscribers register per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Camera,
    MainMenu,
    Screen,
    Opacity,
    SystemRemove,
    Player,
    Sound,
    Debug,
}

impl EventCategory {
    pub const ALL: [EventCategory; 8] = [
        Self::Camera,
        Self::MainMenu,
        Self::Screen,
        Self::Opacity,
        Self::SystemRemove,
        Self::Player,
        Self::Sound,
        Self::Debug,
    ];
}

//=== EventAction =========================================================

/// Fine-grained action within a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventAction {
    //--- Menu / lifecycle -------------------------------------------------
    OnPlay,
    OnStop,
    OnPause,
    OnStart,
    OnRestart,
    OnExit,
    OnClick,
    OnHover,

    //--- Sound ------------------------------------------------------------
    OnVolumeUp,
    OnVolumeDown,
    OnMute,
    OnUnMute,

    //--- Camera -----------------------------------------------------------
    OnCameraChanged,
    OnCameraSetActive,
    OnCameraCycle,

    //--- Player -----------------------------------------------------------
    OnLoseHealth,
    OnGainHealth,
    OnHealthChange,
    OnLose,
    OnWin,
    OnPickup,

    //--- Objects ----------------------------------------------------------
    OnOpen,
    OnClose,
    OnMouseCentre,
    OnRemoveActor,
    OnOpaqueToTransparent,
    OnTransparentToOpaque,

    //--- Debug ------------------------------------------------------------
    OnToggleDebug,
}

//=== EventParam ==========================================================

/// Typed event parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum EventParam {
    Text(String),
    Int(i32),
    Float(f32),
    Actor(ActorId),
}

impl EventParam {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Actor(_) => "actor",
        }
    }
}

impl From<&str> for EventParam {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EventParam {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for EventParam {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<f32> for EventParam {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<ActorId> for EventParam {
    fn from(value: ActorId) -> Self {
        Self::Actor(value)
    }
}

//=== EventKey ============================================================

/// Deduplication identity of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKey {
    pub sender: Option<ActorId>,
    pub category: EventCategory,
    pub action: EventAction,
}

//=== EventData ===========================================================

/// A published event.
///
/// Built with [`EventData::new`] and the `with_*` setters. Cloning copies
/// the parameter list; the sender is an id, so the referenced actor is
/// never duplicated.
///
/// # Equality
///
/// Equal when sender, category and action are equal. Parameters are
/// ignored (consistent with [`Hash`]), which is what the per-tick dedup
/// relies on.
///
/// ```text
/// MainMenu/OnPause (no sender) == MainMenu/OnPause (no sender)   ✓
/// Camera/OnCameraSetActive ["a"] == Camera/OnCameraSetActive ["b"] ✓
/// SystemRemove/OnRemoveActor #1 == SystemRemove/OnRemoveActor #2 ✗
/// ```
#[derive(Debug, Clone)]
pub struct EventData {
    category: EventCategory,
    action: EventAction,
    sender: Option<ActorId>,
    parameters: Vec<EventParam>,
}

impl EventData {
    pub fn new(category: EventCategory, action: EventAction) -> Self {
        Self {
            category,
            action,
            sender: None,
            parameters: Vec::new(),
        }
    }

    pub fn with_sender(mut self, sender: ActorId) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn with_parameter(mut self, param: impl Into<EventParam>) -> Self {
        self.parameters.push(param.into());
        self
    }

    pub fn with_parameters(mut self, params: Vec<EventParam>) -> Self {
        self.parameters = params;
        self
    }

    //--- Accessors --------------------------------------------------------

    pub fn category(&self) -> EventCategory {
        self.category
    }

    pub fn action(&self) -> EventAction {
        self.action
    }

    pub fn sender(&self) -> Option<ActorId> {
        self.sender
    }

    pub fn parameters(&self) -> &[EventParam] {
        &self.parameters
    }

    pub fn key(&self) -> EventKey {
        EventKey {
            sender: self.sender,
            category: self.category,
            action: self.action,
        }
    }

    //--- Validation -------------------------------------------------------

    /// Checks the fields an action cannot do without.
    ///
    /// - `OnRemoveActor`, `OnOpaqueToTransparent`, `OnTransparentToOpaque`
    ///   need a sender (the actor concerned).
    /// - `OnCameraSetActive` needs a text camera id at index 0.
    /// - `OnHealthChange` needs a text target id and an int delta.
    pub fn validate(&self) -> Result<(), EventError> {
        let invalid = |reason| EventError::InvalidEvent {
            category: self.category,
            action: self.action,
            reason,
        };

        match self.action {
            EventAction::OnRemoveActor
            | EventAction::OnOpaqueToTransparent
            | EventAction::OnTransparentToOpaque
                if self.sender.is_none() =>
            {
                Err(invalid("sender actor is required"))
            }
            EventAction::OnCameraSetActive
                if !matches!(self.parameters.first(), Some(EventParam::Text(_))) =>
            {
                Err(invalid("camera id parameter is required"))
            }
            EventAction::OnHealthChange
                if !matches!(
                    self.parameters.as_slice(),
                    [EventParam::Text(_), EventParam::Int(_), ..]
                ) =>
            {
                Err(invalid("target id and delta parameters are required"))
            }
            _ => Ok(()),
        }
    }

    //--- Typed Parameter Access -------------------------------------------

    fn param(&self, index: usize) -> Result<&EventParam, HandlerError> {
        self.parameters.get(index).ok_or(HandlerError::MissingParameter {
            action: self.action,
            index,
        })
    }

    fn type_error(&self, index: usize, expected: &'static str) -> HandlerError {
        HandlerError::ParameterType {
            action: self.action,
            index,
            expected,
        }
    }

    pub fn text_param(&self, index: usize) -> Result<&str, HandlerError> {
        match self.param(index)? {
            EventParam::Text(text) => Ok(text),
            _ => Err(self.type_error(index, "text")),
        }
    }

    pub fn int_param(&self, index: usize) -> Result<i32, HandlerError> {
        match self.param(index)? {
            EventParam::Int(value) => Ok(*value),
            _ => Err(self.type_error(index, "int")),
        }
    }

    pub fn float_param(&self, index: usize) -> Result<f32, HandlerError> {
        match self.param(index)? {
            EventParam::Float(value) => Ok(*value),
            EventParam::Int(value) => Ok(*value as f32),
            _ => Err(self.type_error(index, "float")),
        }
    }

    pub fn actor_param(&self, index: usize) -> Result<ActorId, HandlerError> {
        match self.param(index)? {
            EventParam::Actor(id) => Ok(*id),
            _ => Err(self.type_error(index, "actor")),
        }
    }

    /// Sender, or `MissingParameter` at index 0 when absent.
    pub fn require_sender(&self) -> Result<ActorId, HandlerError> {
        self.sender.ok_or(HandlerError::MissingParameter {
            action: self.action,
            index: 0,
        })
    }
}

//--- Trait Implementations -----------------------------------------------

impl PartialEq for EventData {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for EventData {}

impl Hash for EventData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for EventData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}", self.category, self.action)?;
        if let Some(sender) = self.sender {
            write!(f, " from {}", sender)?;
        }
        if !self.parameters.is_empty() {
            let kinds: Vec<&str> = self.parameters.iter().map(EventParam::kind_name).collect();
            write!(f, " [{}]", kinds.join(", "))?;
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    //=====================================================================
    // Equality & Hashing
    //=====================================================================

    #[test]
    fn equal_when_sender_category_action_match() {
        let a = EventData::new(EventCategory::MainMenu, EventAction::OnPause);
        let b = EventData::new(EventCategory::MainMenu, EventAction::OnPause);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn parameters_do_not_affect_identity() {
        let a = EventData::new(EventCategory::Camera, EventAction::OnCameraSetActive)
            .with_parameter("third person camera");
        let b = EventData::new(EventCategory::Camera, EventAction::OnCameraSetActive)
            .with_parameter("static camera");
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn different_senders_are_distinct() {
        let a = EventData::new(EventCategory::SystemRemove, EventAction::OnRemoveActor)
            .with_sender(ActorId(1));
        let b = EventData::new(EventCategory::SystemRemove, EventAction::OnRemoveActor)
            .with_sender(ActorId(2));
        assert_ne!(a, b);
    }

    #[test]
    fn same_action_different_category_is_distinct() {
        let a = EventData::new(EventCategory::MainMenu, EventAction::OnPause);
        let b = EventData::new(EventCategory::Sound, EventAction::OnPause);
        assert_ne!(a, b);
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn clone_copies_parameters() {
        let original = EventData::new(EventCategory::Player, EventAction::OnHealthChange)
            .with_parameter("health bar")
            .with_parameter(-10);
        let copy = original.clone();
        assert_eq!(copy.parameters(), original.parameters());
    }

    //=====================================================================
    // Validation
    //=====================================================================

    #[test]
    fn remove_actor_requires_sender() {
        let event = EventData::new(EventCategory::SystemRemove, EventAction::OnRemoveActor);
        assert!(matches!(event.validate(), Err(EventError::InvalidEvent { .. })));

        let event = event.with_sender(ActorId(7));
        assert_eq!(event.validate(), Ok(()));
    }

    #[test]
    fn camera_set_active_requires_text_id() {
        let event = EventData::new(EventCategory::Camera, EventAction::OnCameraSetActive);
        assert!(event.validate().is_err());

        let event = event.with_parameter(3);
        assert!(event.validate().is_err());

        let event = EventData::new(EventCategory::Camera, EventAction::OnCameraSetActive)
            .with_parameter("static camera");
        assert!(event.validate().is_ok());
    }

    #[test]
    fn health_change_requires_target_and_delta() {
        let event = EventData::new(EventCategory::Player, EventAction::OnHealthChange)
            .with_parameter("health bar");
        assert!(event.validate().is_err());

        let event = event.with_parameter(5);
        assert!(event.validate().is_ok());
    }

    #[test]
    fn actions_without_requirements_are_valid() {
        for category in EventCategory::ALL {
            let event = EventData::new(category, EventAction::OnStart);
            assert!(event.validate().is_ok());
        }
    }

    //=====================================================================
    // Typed Parameters
    //=====================================================================

    #[test]
    fn typed_accessors() {
        let event = EventData::new(EventCategory::Player, EventAction::OnHealthChange)
            .with_parameter("bar")
            .with_parameter(4)
            .with_parameter(0.5_f32)
            .with_parameter(ActorId(9));

        assert_eq!(event.text_param(0), Ok("bar"));
        assert_eq!(event.int_param(1), Ok(4));
        assert_eq!(event.float_param(1), Ok(4.0));
        assert_eq!(event.float_param(2), Ok(0.5));
        assert_eq!(event.actor_param(3), Ok(ActorId(9)));
    }

    #[test]
    fn typed_accessor_errors() {
        let event = EventData::new(EventCategory::Player, EventAction::OnHealthChange)
            .with_parameter("bar");

        assert_eq!(
            event.int_param(0),
            Err(HandlerError::ParameterType {
                action: EventAction::OnHealthChange,
                index: 0,
                expected: "int"
            })
        );
        assert_eq!(
            event.int_param(1),
            Err(HandlerError::MissingParameter {
                action: EventAction::OnHealthChange,
                index: 1
            })
        );
    }

    #[test]
    fn display_includes_sender_and_parameter_kinds() {
        let event = EventData::new(EventCategory::SystemRemove, EventAction::OnRemoveActor)
            .with_sender(ActorId(3))
            .with_parameter("x");
        assert_eq!(event.to_string(), "SystemRemove/OnRemoveActor from #3 [text]");
    }
}
