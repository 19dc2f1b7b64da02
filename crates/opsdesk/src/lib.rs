pub mod api;
pub mod broadcast;
pub mod error;
pub mod fields;
pub mod notify;
pub mod secrets;
pub mod session;
pub mod settings;
pub mod stages;

pub use api::{ApiClient, ApiError, ApiTransport, TokenProvider};
pub use broadcast::{PushBroadcaster, ToastBroadcaster, ToastEvent, ToastLevel};
pub use error::{OpsdeskError, Result};
pub use fields::{
    EntityType, FieldControl, FieldDefinition, FieldDraft, FieldError, FieldRegistry, FieldType,
};
pub use notify::{NotifyError, PushMessage, PushRegistrar};
pub use secrets::{SecretError, TokenEncryptor};
pub use session::{AuthenticatedUser, SessionError, SessionStore, UserCache};
pub use settings::{load_settings, Settings, SettingsError};
pub use stages::{
    PipelineView, Stage, StageActions, StageNode, StageNodeState, StageRegistry, TimelineEvent,
};
