use std::cell::RefCell;
use std::rc::Rc;

use lenshud_core::{
    CameraDevice, CameraOverlay, Config, DeviceProvider, OverlayError, SessionPhase,
    ZoomCapability,
};

/// Shared record of everything the coordinator did to the device; keeps
/// observing possible after the coordinator drops the handle.
#[derive(Default)]
struct DeviceLog {
    calls: Vec<String>,
    zoom: i32,
    released: bool,
}

struct MockDevice {
    log: Rc<RefCell<DeviceLog>>,
    capability: ZoomCapability,
    reject_bind: bool,
    reject_zoom: bool,
}

impl CameraDevice for MockDevice {
    fn zoom_capability(&self) -> ZoomCapability {
        self.capability
    }

    fn zoom(&self) -> i32 {
        self.log.borrow().zoom
    }

    fn set_zoom(&mut self, zoom: i32) -> Result<(), OverlayError> {
        if self.reject_zoom {
            return Err(OverlayError::ZoomRejected {
                requested: zoom,
                reason: "mock refusal".into(),
            });
        }
        let mut log = self.log.borrow_mut();
        log.zoom = zoom;
        log.calls.push(format!("set_zoom {zoom}"));
        Ok(())
    }

    fn set_preview_size(&mut self, width: u32, height: u32) {
        self.log
            .borrow_mut()
            .calls
            .push(format!("set_preview_size {width}x{height}"));
    }

    fn bind_surface(&mut self) -> Result<(), OverlayError> {
        if self.reject_bind {
            return Err(OverlayError::SurfaceBindingFailed("mock refusal".into()));
        }
        self.log.borrow_mut().calls.push("bind_surface".into());
        Ok(())
    }

    fn start_preview(&mut self) {
        self.log.borrow_mut().calls.push("start_preview".into());
    }

    fn stop_preview(&mut self) {
        self.log.borrow_mut().calls.push("stop_preview".into());
    }
}

impl Drop for MockDevice {
    fn drop(&mut self) {
        self.log.borrow_mut().released = true;
    }
}

struct MockProvider {
    log: Rc<RefCell<DeviceLog>>,
    capability: ZoomCapability,
    fail: bool,
    reject_bind: bool,
    reject_zoom: bool,
}

impl MockProvider {
    fn new(capability: ZoomCapability) -> Self {
        Self {
            log: Rc::default(),
            capability,
            fail: false,
            reject_bind: false,
            reject_zoom: false,
        }
    }

    fn calls(&self) -> Vec<String> {
        self.log.borrow().calls.clone()
    }
}

impl DeviceProvider for MockProvider {
    fn acquire(&mut self) -> Result<Box<dyn CameraDevice>, OverlayError> {
        if self.fail {
            return Err(OverlayError::DeviceUnavailable("mock camera busy".into()));
        }
        Ok(Box::new(MockDevice {
            log: self.log.clone(),
            capability: self.capability,
            reject_bind: self.reject_bind,
            reject_zoom: self.reject_zoom,
        }))
    }
}

fn zoomable() -> ZoomCapability {
    ZoomCapability {
        supported: true,
        min: 0,
        max: 30,
    }
}

fn overlay() -> CameraOverlay {
    CameraOverlay::new(Config {
        reference_scale: 200.0,
        max_zoom_step: 5,
        trace_height_ceiling: 10_000,
    })
}

/// it should configure, bind, and start the preview on the first surface
/// change
#[test]
fn created_then_changed_starts_the_preview() {
    let mut provider = MockProvider::new(zoomable());
    let mut hud = overlay();

    hud.on_surface_created(&mut provider);
    assert_eq!(hud.session_phase(), SessionPhase::Bound);

    hud.on_surface_changed(640, 480);
    assert_eq!(hud.session_phase(), SessionPhase::Previewing);
    assert_eq!(hud.surface_size(), Some((640, 480)));
    assert_eq!(
        provider.calls(),
        vec!["set_preview_size 640x480", "bind_surface", "start_preview"]
    );
}

/// it should stop a running preview exactly once before reconfiguring
#[test]
fn reentrant_change_stops_before_restarting() {
    let mut provider = MockProvider::new(zoomable());
    let mut hud = overlay();
    hud.on_surface_created(&mut provider);
    hud.on_surface_changed(640, 480);

    hud.on_surface_changed(800, 600);
    assert_eq!(hud.session_phase(), SessionPhase::Previewing);
    assert_eq!(hud.surface_size(), Some((800, 600)));
    assert_eq!(
        provider.calls(),
        vec![
            "set_preview_size 640x480",
            "bind_surface",
            "start_preview",
            "stop_preview",
            "set_preview_size 800x600",
            "bind_surface",
            "start_preview",
        ]
    );
}

/// it should stay Unbound when acquisition fails and ignore later surface
/// changes without touching the device
#[test]
fn failed_acquisition_leaves_the_session_unbound() {
    let mut provider = MockProvider::new(zoomable());
    provider.fail = true;
    let mut hud = overlay();

    hud.on_surface_created(&mut provider);
    assert_eq!(hud.session_phase(), SessionPhase::Unbound);

    hud.on_surface_changed(640, 480);
    assert_eq!(hud.session_phase(), SessionPhase::Unbound);
    assert!(provider.calls().is_empty());
    assert_eq!(hud.surface_size(), None);
}

/// it should keep the session Bound when the platform rejects the preview
/// target
#[test]
fn bind_failure_keeps_the_session_bound() {
    let mut provider = MockProvider::new(zoomable());
    provider.reject_bind = true;
    let mut hud = overlay();
    hud.on_surface_created(&mut provider);

    hud.on_surface_changed(640, 480);
    assert_eq!(hud.session_phase(), SessionPhase::Bound);
    assert_eq!(provider.calls(), vec!["set_preview_size 640x480"]);
}

/// it should tear down idempotently: one stop, one release, and a second
/// destroy is a no-op
#[test]
fn destroy_is_idempotent() {
    let mut provider = MockProvider::new(zoomable());
    let mut hud = overlay();
    hud.on_surface_created(&mut provider);
    hud.on_surface_changed(640, 480);

    hud.on_surface_destroyed();
    assert_eq!(hud.session_phase(), SessionPhase::Unbound);
    assert!(provider.log.borrow().released);
    let stops = provider
        .calls()
        .iter()
        .filter(|c| *c == "stop_preview")
        .count();
    assert_eq!(stops, 1);

    let calls_before = provider.calls().len();
    hud.on_surface_destroyed();
    assert_eq!(hud.session_phase(), SessionPhase::Unbound);
    assert_eq!(provider.calls().len(), calls_before);
}

/// it should release a device that never previewed without stopping it
#[test]
fn destroy_from_bound_skips_the_stop() {
    let mut provider = MockProvider::new(zoomable());
    let mut hud = overlay();
    hud.on_surface_created(&mut provider);

    hud.on_surface_destroyed();
    assert_eq!(hud.session_phase(), SessionPhase::Unbound);
    assert!(provider.log.borrow().released);
    assert!(provider.calls().is_empty());
}

/// it should fail loudly in debug builds when the surface is created twice
#[test]
#[should_panic(expected = "already bound")]
fn double_create_is_a_logic_error() {
    let mut provider = MockProvider::new(zoomable());
    let mut hud = overlay();
    hud.on_surface_created(&mut provider);
    hud.on_surface_created(&mut provider);
}

/// it should clamp the applied zoom against the capability-reported range,
/// not a fixed literal
#[test]
fn zoom_clamps_to_the_capability_range() {
    let mut provider = MockProvider::new(zoomable());
    let mut hud = overlay();
    hud.on_surface_created(&mut provider);
    hud.on_surface_changed(640, 480);

    provider.log.borrow_mut().zoom = 28;
    hud.apply_zoom_delta(5);
    assert_eq!(provider.log.borrow().zoom, 30);

    provider.log.borrow_mut().zoom = 1;
    hud.apply_zoom_delta(-5);
    assert_eq!(provider.log.borrow().zoom, 0);
}

/// it should bound a host-supplied delta to the step range before applying
#[test]
fn oversized_delta_is_bounded_to_the_step_range() {
    let mut provider = MockProvider::new(zoomable());
    let mut hud = overlay();
    hud.on_surface_created(&mut provider);
    hud.on_surface_changed(640, 480);

    hud.apply_zoom_delta(99);
    assert_eq!(provider.log.borrow().zoom, 5);
}

/// it should ignore zoom requests while not previewing
#[test]
fn zoom_requires_a_running_preview() {
    let mut provider = MockProvider::new(zoomable());
    let mut hud = overlay();
    hud.on_surface_created(&mut provider);

    hud.apply_zoom_delta(2);
    assert!(provider.calls().iter().all(|c| !c.starts_with("set_zoom")));
}

/// it should ignore zoom requests when the device has no zoom support
#[test]
fn zoom_requires_capability_support() {
    let mut provider = MockProvider::new(ZoomCapability {
        supported: false,
        min: 0,
        max: 0,
    });
    let mut hud = overlay();
    hud.on_surface_created(&mut provider);
    hud.on_surface_changed(640, 480);

    hud.apply_zoom_delta(2);
    assert!(provider.calls().iter().all(|c| !c.starts_with("set_zoom")));
}

/// it should leave the zoom unchanged when the device refuses the value
#[test]
fn rejected_zoom_changes_nothing() {
    let mut provider = MockProvider::new(zoomable());
    provider.reject_zoom = true;
    let mut hud = overlay();
    hud.on_surface_created(&mut provider);
    hud.on_surface_changed(640, 480);

    provider.log.borrow_mut().zoom = 3;
    hud.apply_zoom_delta(2);
    assert_eq!(provider.log.borrow().zoom, 3);
    assert_eq!(hud.session_phase(), SessionPhase::Previewing);
}
