use web_sys as web;

// Keyframes for the effects spawned by the controller.
const EFFECT_KEYFRAMES: &str = r#"
@keyframes confettiDrop {
    0% { transform: translateY(0) rotate(0deg); opacity: 1; }
    100% { transform: translateY(100vh) rotate(720deg); opacity: 0; }
}
@keyframes ripple {
    to { transform: scale(4); opacity: 0; }
}
@keyframes smokeRise {
    0% { opacity: 0.6; transform: translateY(0) scale(1); }
    100% { opacity: 0; transform: translateY(-35px) scale(1.5); }
}
@keyframes soundWave {
    0% { transform: translate(-50%, -50%) scale(0); opacity: 1; }
    100% { transform: translate(-50%, -50%) scale(3); opacity: 0; }
}
@keyframes particleFloat {
    0% { transform: translateY(0) rotate(0deg); opacity: 0; }
    10% { opacity: 0.6; }
    90% { opacity: 0.6; }
    100% { transform: translateY(-100vh) rotate(360deg); opacity: 0; }
}
@keyframes heartFloat {
    0% { transform: translateY(0) rotate(45deg); opacity: 0.5; }
    50% { opacity: 0.8; }
    100% { transform: translateY(-100vh) rotate(405deg); opacity: 0; }
}
@keyframes starFloat {
    0% { transform: translateY(0) scale(1) rotate(0deg); opacity: 0.7; }
    50% { transform: translateY(-50vh) scale(1.3) rotate(180deg); opacity: 1; }
    100% { transform: translateY(-100vh) scale(0.8) rotate(360deg); opacity: 0; }
}
"#;

pub fn inject(document: &web::Document) {
    let Ok(style) = document.create_element("style") else {
        return;
    };
    style.set_text_content(Some(EFFECT_KEYFRAMES));
    if let Some(head) = document.head() {
        _ = head.append_child(&style);
    }
}
