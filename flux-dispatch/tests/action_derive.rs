//! Tests for #[derive(Action)] macro

use flux_dispatch::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum PlayerAction {
    #[action(tag = "player/play")]
    Play,
    #[action(tag = "player/seek")]
    Seek(u64),
    #[action(tag = "player/load")]
    Load { url: String, autoplay: bool },
    Stop,
    #[action(skip)]
    Internal(String),
}

#[test]
fn test_name_uses_tag() {
    assert_eq!(PlayerAction::Play.name(), "player/play");
    assert_eq!(PlayerAction::Seek(3).name(), "player/seek");
    assert_eq!(
        PlayerAction::Load {
            url: "a.mp3".into(),
            autoplay: true
        }
        .name(),
        "player/load"
    );
}

#[test]
fn test_name_defaults_to_variant_name() {
    assert_eq!(PlayerAction::Stop.name(), "Stop");
    assert_eq!(PlayerAction::Internal("x".into()).name(), "Internal");
}

#[test]
fn test_tag_constants() {
    assert_eq!(PlayerAction::PLAY_TAG, "player/play");
    assert_eq!(PlayerAction::SEEK_TAG, "player/seek");
    assert_eq!(PlayerAction::LOAD_TAG, "player/load");
    assert_eq!(PlayerAction::STOP_TAG, "Stop");
}

#[test]
fn test_tags_skip_hidden_variants() {
    assert_eq!(
        PlayerAction::TAGS,
        &["player/play", "player/seek", "player/load", "Stop"]
    );
    assert!(PlayerAction::is_known_tag("player/seek"));
    assert!(!PlayerAction::is_known_tag("Internal"));
    assert!(!PlayerAction::is_known_tag("player/pause"));
}

#[test]
fn test_tag_constants_work_as_patterns() {
    fn decode(tag: &str) -> Option<PlayerAction> {
        match tag {
            PlayerAction::PLAY_TAG => Some(PlayerAction::Play),
            PlayerAction::STOP_TAG => Some(PlayerAction::Stop),
            _ => None,
        }
    }

    assert_eq!(decode("player/play"), Some(PlayerAction::Play));
    assert_eq!(decode("Stop"), Some(PlayerAction::Stop));
    assert_eq!(decode("player/seek"), None);
}
