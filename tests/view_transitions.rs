mod common;

use common::{controller, editing, load, picked, EventLog, ScriptedSource};
use egui::Vec2;
use sticker_smash::catalog::StickerId;
use sticker_smash::error::{PickError, TransitionError};
use sticker_smash::event::SessionEvent;
use sticker_smash::notice::NoticeKind;
use sticker_smash::picker::{PickOptions, PickOutcome};
use sticker_smash::session::{ImageRef, ViewKind, ViewState};

#[test]
fn test_picked_image_enters_editing() {
    let mut controller = controller();
    controller.begin_image_request().unwrap();
    assert!(controller.is_requesting_image());

    controller.finish_image_request(Ok(picked("photo1"))).unwrap();

    let state = controller.state();
    assert_eq!(state.kind(), ViewKind::Editing);
    assert_eq!(state.image_ref(), Some(&ImageRef::picked("photo1")));
    assert!(state.edit_mode());
    assert!(!controller.is_requesting_image());
    assert!(controller.take_notices().is_empty());
}

#[test]
fn test_cancelled_pick_stays_idle_with_notice() {
    let mut controller = controller();
    controller.begin_image_request().unwrap();
    controller.finish_image_request(Ok(PickOutcome::Cancelled)).unwrap();

    assert_eq!(*controller.state(), ViewState::Idle);
    let notices = controller.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "You did not select any image.");
    assert_eq!(notices[0].kind, NoticeKind::Info);
}

#[test]
fn test_failed_pick_stays_idle_with_error_notice() {
    let mut controller = controller();
    controller.begin_image_request().unwrap();
    controller.finish_image_request(Err(PickError::Empty)).unwrap();

    assert!(controller.state().is_idle());
    assert_eq!(controller.take_notices()[0].kind, NoticeKind::Error);
}

#[test]
fn test_second_image_request_is_busy() {
    let mut controller = controller();
    controller.begin_image_request().unwrap();
    assert_eq!(controller.begin_image_request(), Err(TransitionError::Busy("image request")));
    assert_eq!(controller.use_placeholder(), Err(TransitionError::Busy("image request")));
}

#[test]
fn test_request_image_through_source() {
    let mut controller = controller();
    let source = ScriptedSource::new(picked("photo2"));

    let pending = controller.request_image(&source, PickOptions::default(), None).unwrap();
    assert!(controller.is_requesting_image());
    assert!(controller.request_image(&source, PickOptions::default(), None).is_err());

    let result = pending.take().unwrap();
    controller.finish_image_request(result).unwrap();
    assert_eq!(controller.state().image_ref(), Some(&ImageRef::picked("photo2")));
    assert_eq!(source.requests.lock().len(), 1);
    assert!(source.requests.lock()[0].allows_editing);
}

#[test]
fn test_pick_sticker_closes_modal() {
    let mut controller = editing("photo1");
    controller.open_sticker_picker().unwrap();
    assert!(controller.state().modal_open());

    let emoji3 = controller.catalog().find_by_name("emoji3").unwrap().id;
    controller.pick_sticker(emoji3).unwrap();

    let state = controller.state();
    assert_eq!(state.kind(), ViewKind::Editing);
    assert_eq!(state.sticker_ref(), Some(emoji3));
    assert!(!state.modal_open());
    assert_eq!(state.image_ref(), Some(&ImageRef::picked("photo1")));
}

#[test]
fn test_close_modal_keeps_sticker() {
    let mut controller = editing("photo1");
    controller.open_sticker_picker().unwrap();
    controller.pick_sticker(StickerId(1)).unwrap();

    controller.open_sticker_picker().unwrap();
    controller.close_sticker_picker().unwrap();

    assert!(!controller.state().modal_open());
    assert_eq!(controller.state().sticker_ref(), Some(StickerId(1)));
}

#[test]
fn test_reset_returns_exact_initial_state() {
    for with_sticker in [false, true] {
        let mut controller = editing("photo1");
        if with_sticker {
            controller.open_sticker_picker().unwrap();
            controller.pick_sticker(StickerId(0)).unwrap();
            controller.move_sticker(Vec2::new(12.0, -4.0)).unwrap();
        }

        controller.reset().unwrap();

        assert_eq!(*controller.state(), ViewState::default());
        assert!(controller.state().image_ref().is_none());
        assert!(controller.state().sticker_ref().is_none());
    }
}

#[test]
fn test_pick_sticker_without_modal_is_rejected() {
    let mut controller = editing("photo1");
    let before = controller.state().clone();

    let err = controller.pick_sticker(StickerId(2)).unwrap_err();
    assert!(matches!(err, TransitionError::InvalidTransition { .. }));
    assert_eq!(*controller.state(), before);

    let mut idle = common::controller();
    assert!(idle.pick_sticker(StickerId(2)).is_err());
    assert!(idle.state().is_idle());
}

#[test]
fn test_unknown_sticker_is_rejected() {
    let mut controller = editing("photo1");
    controller.open_sticker_picker().unwrap();
    assert_eq!(controller.pick_sticker(StickerId(42)), Err(TransitionError::UnknownSticker(42)));
    assert!(controller.state().modal_open());
}

#[test]
fn test_modal_open_only_while_picking_sticker() {
    let mut controller = controller();
    let check = |controller: &sticker_smash::ViewController| {
        let state = controller.state();
        assert_eq!(state.modal_open(), state.kind() == ViewKind::PickingSticker);
        assert_eq!(state.edit_mode(), state.image_ref().is_some());
        if state.sticker_ref().is_some() {
            assert!(state.edit_mode());
        }
    };

    // A mixed sequence including rejected events
    check(&controller);
    let _ = controller.open_sticker_picker();
    check(&controller);
    let _ = controller.reset();
    check(&controller);
    load(&mut controller, "photo1");
    check(&controller);
    let _ = controller.close_sticker_picker();
    check(&controller);
    controller.open_sticker_picker().unwrap();
    check(&controller);
    let _ = controller.reset();
    check(&controller);
    let _ = controller.open_sticker_picker();
    check(&controller);
    controller.pick_sticker(StickerId(5)).unwrap();
    check(&controller);
    controller.reset().unwrap();
    check(&controller);
    controller.use_placeholder().unwrap();
    check(&controller);
}

#[test]
fn test_use_placeholder_enters_editing() {
    let mut controller = controller();
    controller.use_placeholder().unwrap();
    assert_eq!(controller.state().image_ref(), Some(&ImageRef::Placeholder));
    assert!(controller.state().edit_mode());
    assert!(controller.use_placeholder().is_err());
}

#[test]
fn test_drag_and_double_tap_sticker() {
    let mut controller = editing("photo1");
    assert!(controller.move_sticker(Vec2::new(1.0, 1.0)).is_err());

    controller.open_sticker_picker().unwrap();
    controller.pick_sticker(StickerId(4)).unwrap();
    controller.move_sticker(Vec2::new(10.0, 5.0)).unwrap();
    controller.move_sticker(Vec2::new(-2.0, 5.0)).unwrap();
    controller.toggle_sticker_scale().unwrap();

    let placed = controller.state().placed_sticker().copied().unwrap();
    assert_eq!(placed.offset, Vec2::new(8.0, 10.0));
    assert_eq!(placed.scale, 2.0);

    controller.toggle_sticker_scale().unwrap();
    assert_eq!(controller.state().placed_sticker().unwrap().scale, 1.0);

    // The centre cannot be dragged out of the frame
    controller.move_sticker(Vec2::new(500.0, -500.0)).unwrap();
    assert_eq!(controller.state().placed_sticker().unwrap().offset, Vec2::new(160.0, -60.0));

    // A freshly picked sticker starts at the default placement
    controller.open_sticker_picker().unwrap();
    controller.pick_sticker(StickerId(0)).unwrap();
    assert_eq!(controller.state().placed_sticker().unwrap().offset, Vec2::ZERO);
}

#[test]
fn test_transitions_are_published() {
    let mut controller = controller();
    let log = EventLog::default();
    controller.subscribe(Box::new(log.clone()));

    load(&mut controller, "photo1");
    controller.open_sticker_picker().unwrap();
    controller.pick_sticker(StickerId(2)).unwrap();
    controller.toggle_sticker_scale().unwrap();
    controller.reset().unwrap();

    let events = log.events.lock().clone();
    assert_eq!(events[0], SessionEvent::ImageRequested);
    assert!(events.contains(&SessionEvent::ImageLoaded(ImageRef::picked("photo1"))));
    assert!(events.contains(&SessionEvent::StickerPicked(StickerId(2))));
    assert!(events.contains(&SessionEvent::StickerResized { id: StickerId(2), scale: 2.0 }));
    assert_eq!(
        events.last(),
        Some(&SessionEvent::StateChanged { old: ViewKind::Editing, new: ViewKind::Idle })
    );
}
