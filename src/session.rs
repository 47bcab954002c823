//! Session flow: loading, the start click, and the content panel.
//!
//! ```text
//! Loading --(asset ready + start click)--> Playing
//! Playing --(analyze)--> Paused --(close panel)--> Playing
//! ```
//!
//! A failed load leaves the session in `Loading` for good; there is no
//! retry.

use bevy::prelude::*;

use crate::bodies::SolarSystem;
use crate::camera::CameraRig;
use crate::config::FlightConfig;
use crate::craft::Craft;
use crate::proximity::ActiveObject;
use crate::types::AppState;

/// Errors surfaced by the session and its host collaborators.
///
/// None of these are fatal to the frame loop; they are logged and the
/// session carries on in a degraded mode.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("craft asset failed to load: {0}")]
    AssetLoad(String),

    #[error("tilt steering permission was denied")]
    TiltDenied,

    #[error("tilt steering is not supported on this device")]
    TiltUnsupported,
}

/// Progress report from the asset loader.
#[derive(Message, Clone, Debug, PartialEq)]
pub enum AssetLoadEvent {
    /// Fraction loaded in [0, 1]. Cosmetic only.
    Progress(f32),
    /// The craft model is in the scene as this entity.
    Ready(Entity),
    Failed(String),
}

/// The player clicked through the loading overlay.
#[derive(Message, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StartFlight;

/// The player asked to open the content panel for the active object.
#[derive(Message, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalyzeRequest;

/// The player closed the content panel.
#[derive(Message, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClosePanel;

/// What the loading overlay shows.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct LoadingStatus {
    pub progress: f32,
    pub ready: bool,
    pub error: Option<SessionError>,
}

impl LoadingStatus {
    /// The start click will be honoured.
    pub fn can_start(&self) -> bool {
        self.ready && self.error.is_none()
    }
}

/// Content panel state. `open_key` is the display name of the analyzed
/// body while the panel is open.
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentPanel {
    pub open_key: Option<String>,
}

impl ContentPanel {
    pub fn is_open(&self) -> bool {
        self.open_key.is_some()
    }
}

/// Plugin providing the session state machine.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .add_message::<AssetLoadEvent>()
            .add_message::<StartFlight>()
            .add_message::<AnalyzeRequest>()
            .add_message::<ClosePanel>()
            .init_resource::<LoadingStatus>()
            .init_resource::<ContentPanel>()
            .add_systems(
                Update,
                (
                    (track_loading, handle_start)
                        .chain()
                        .run_if(in_state(AppState::Loading)),
                    handle_analyze.run_if(in_state(AppState::Playing)),
                    handle_close.run_if(in_state(AppState::Paused)),
                ),
            )
            .add_systems(OnEnter(AppState::Playing), log_playing)
            .add_systems(OnEnter(AppState::Paused), log_paused);
    }
}

fn track_loading(
    mut commands: Commands,
    mut events: MessageReader<AssetLoadEvent>,
    mut status: ResMut<LoadingStatus>,
    config: Res<FlightConfig>,
    craft: Option<Res<Craft>>,
) {
    let mut have_craft = craft.is_some();

    for event in events.read() {
        match event {
            AssetLoadEvent::Progress(fraction) => {
                if !status.ready {
                    status.progress = fraction.clamp(0.0, 1.0);
                }
            }
            AssetLoadEvent::Ready(entity) => {
                if have_craft {
                    warn!("Ignoring duplicate craft ready report for {entity}");
                    continue;
                }
                have_craft = true;
                info!("Craft asset ready, waiting for start");
                status.progress = 1.0;
                status.ready = true;
                commands.insert_resource(Craft::new(*entity, &config));
                commands.insert_resource(CameraRig::new(&config.camera));
            }
            AssetLoadEvent::Failed(reason) => {
                let err = SessionError::AssetLoad(reason.clone());
                error!("{err}");
                status.error = Some(err);
            }
        }
    }
}

fn handle_start(
    mut starts: MessageReader<StartFlight>,
    status: Res<LoadingStatus>,
    config: Res<FlightConfig>,
    rig: Option<ResMut<CameraRig>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if starts.is_empty() {
        return;
    }
    starts.clear();

    if !status.can_start() {
        debug!("Start ignored, craft not ready");
        return;
    }
    let Some(mut rig) = rig else {
        return;
    };

    rig.yaw = config.camera.intro_yaw;
    next_state.set(AppState::Playing);
}

fn handle_analyze(
    mut requests: MessageReader<AnalyzeRequest>,
    active: Res<ActiveObject>,
    system: Res<SolarSystem>,
    mut panel: ResMut<ContentPanel>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    let Some(name) = active.0.and_then(|body| system.name(body)) else {
        debug!("Analyze ignored, no active object");
        return;
    };

    info!("Analyzing {name}");
    panel.open_key = Some(name.to_string());
    next_state.set(AppState::Paused);
}

fn handle_close(
    mut requests: MessageReader<ClosePanel>,
    mut panel: ResMut<ContentPanel>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    panel.open_key = None;
    next_state.set(AppState::Playing);
}

fn log_playing() {
    info!("Flight active");
}

fn log_paused() {
    info!("Flight paused for content panel");
}
