use counterview_core::{update, AppState, Msg, Surface};

#[test]
fn update_is_noop() {
    let state = AppState::new(Surface::TextForm);
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn session_starts_idle_without_result() {
    for surface in [Surface::TextForm, Surface::ActiveTab] {
        let view = AppState::new(surface).view();
        assert!(!view.is_loading);
        assert!(view.submit_enabled);
        assert_eq!(view.summary, None);
        assert!(view.links.is_empty());
        assert_eq!(view.alert, None);
    }
}
