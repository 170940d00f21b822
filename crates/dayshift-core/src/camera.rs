//! Camera pan and zoom interpolation

use dayshift_api::{CameraFocus, FocusPoint, SessionEvent};
use dayshift_config::CameraSettings;
use tracing::trace;

/// Zoom differences below this snap to the target
const ZOOM_EPSILON: f64 = 1e-3;

#[derive(Debug, Clone, Copy)]
struct Pan {
    from: FocusPoint,
    to: FocusPoint,
    t: f64,
}

/// Drives the camera rig
///
/// Zoom follows its target with exponential smoothing every tick. Pans are
/// linear over `1 / pan_speed` seconds. Without a camera attached every move
/// completes immediately, so choreography never waits on a missing rig.
#[derive(Debug, Clone)]
pub struct CameraController {
    settings: CameraSettings,
    has_camera: bool,
    focus: CameraFocus,
    position: FocusPoint,
    pan: Option<Pan>,
    zoom: f64,
    zoom_target: f64,
}

impl CameraController {
    pub fn new(settings: CameraSettings, has_camera: bool) -> Self {
        Self {
            focus: CameraFocus::Laptop,
            position: settings.laptop_focus,
            pan: None,
            zoom: settings.normal_zoom,
            zoom_target: settings.normal_zoom,
            settings,
            has_camera,
        }
    }

    pub fn focus(&self) -> CameraFocus {
        self.focus
    }

    pub fn position(&self) -> FocusPoint {
        self.position
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_target(&self) -> f64 {
        self.zoom_target
    }

    /// No pan in progress
    pub fn is_settled(&self) -> bool {
        self.pan.is_none()
    }

    pub fn is_zoomed_to_laptop(&self) -> bool {
        (self.zoom_target - self.settings.laptop_zoom).abs() < 0.1
    }

    fn focus_point(&self, focus: CameraFocus) -> FocusPoint {
        match focus {
            CameraFocus::Laptop => self.settings.laptop_focus,
            CameraFocus::Employee => self.settings.employee_focus,
        }
    }

    /// Start moving toward `focus`
    pub fn pan_to(&mut self, focus: CameraFocus, events: &mut Vec<SessionEvent>) {
        let to = self.focus_point(focus);
        self.focus = focus;

        if !self.has_camera {
            self.position = to;
            self.pan = None;
            events.push(SessionEvent::CameraMoved { focus, position: to });
            return;
        }

        self.pan = Some(Pan {
            from: self.position,
            to,
            t: 0.0,
        });
    }

    pub fn zoom_to_laptop(&mut self, events: &mut Vec<SessionEvent>) {
        self.set_zoom_target(self.settings.laptop_zoom, events);
    }

    pub fn zoom_to_normal(&mut self, events: &mut Vec<SessionEvent>) {
        self.set_zoom_target(self.settings.normal_zoom, events);
    }

    /// Flip between laptop and room zoom
    pub fn toggle_zoom(&mut self, events: &mut Vec<SessionEvent>) {
        if self.is_zoomed_to_laptop() {
            self.zoom_to_normal(events);
        } else {
            self.zoom_to_laptop(events);
        }
    }

    fn set_zoom_target(&mut self, target: f64, events: &mut Vec<SessionEvent>) {
        self.zoom_target = target;
        if !self.has_camera {
            self.zoom = target;
            events.push(SessionEvent::ZoomChanged { size: target });
        }
    }

    /// Interpolate zoom and any running pan
    pub fn advance(&mut self, dt: f64, events: &mut Vec<SessionEvent>) {
        if !self.has_camera {
            return;
        }

        let diff = self.zoom_target - self.zoom;
        if diff != 0.0 {
            if diff.abs() < ZOOM_EPSILON {
                self.zoom = self.zoom_target;
            } else {
                self.zoom += diff * (dt * self.settings.zoom_speed).min(1.0);
            }
            trace!(zoom = self.zoom, "Camera zoom");
            events.push(SessionEvent::ZoomChanged { size: self.zoom });
        }

        if let Some(mut pan) = self.pan {
            pan.t += dt * self.settings.pan_speed;
            if pan.t >= 1.0 {
                self.position = pan.to;
                self.pan = None;
            } else {
                self.position = pan.from.lerp(pan.to, pan.t);
                self.pan = Some(pan);
            }
            trace!(x = self.position.x, y = self.position.y, "Camera pan");
            events.push(SessionEvent::CameraMoved {
                focus: self.focus,
                position: self.position,
            });
        }
    }
}
