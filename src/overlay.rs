use web_sys as web;

/// Hide the loading screen and give scrolling back to the page.
#[inline]
pub fn hide_loading(loading: Option<&web::Element>, body: Option<&web::HtmlElement>) {
    if let Some(el) = loading {
        _ = el.class_list().add_1("hidden");
    }
    if let Some(body) = body {
        _ = body.class_list().remove_1("no-scroll");
    }
}

/// Music button and play button markup for the two audio states.
pub fn set_audio_labels(
    music_btn: Option<&web::Element>,
    play_btn: Option<&web::Element>,
    playing: bool,
) {
    if let Some(el) = music_btn {
        el.set_inner_html(if playing {
            "<i class=\"fas fa-stop\"></i><span>Stop Beat</span>"
        } else {
            "<i class=\"fas fa-music\"></i><span>Start the Beat</span>"
        });
    }
    if let Some(el) = play_btn {
        el.set_inner_html(if playing {
            "<i class=\"fas fa-pause\"></i>"
        } else {
            "<i class=\"fas fa-play\"></i>"
        });
    }
}
