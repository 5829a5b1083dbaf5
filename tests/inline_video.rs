//! Inline video integration tests
//!
//! End-to-end tests driving buttons and players through a transcript.

use inline_video::video_frames::test_utils::{RecordingOpener, RecordingViews};
use inline_video::{
    ButtonId, MemoryTranscript, NavigationDecision, PageConfig, ToggleState, Transcript,
    UriOpener, VideoFrames, VideoFramesConfig, WebsiteCatalog, WebsitePattern,
};
use mockall::predicate::eq;
use std::collections::BTreeSet;
use std::sync::Arc;
use tempfile::TempDir;
use inline_video::transcript::Segment;

const YOUTUBE_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

mockall::mock! {
    Opener {}

    impl UriOpener for Opener {
        fn open_uri(&self, uri: &str);
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn youtube() -> Arc<WebsitePattern> {
    WebsiteCatalog::with_defaults().unwrap().get("youtube").unwrap()
}

fn setup(
    text: &str,
    dir: &TempDir,
    opener: Arc<dyn UriOpener>,
) -> (VideoFrames<MemoryTranscript>, RecordingViews) {
    init_tracing();
    let views = RecordingViews::new();
    let config = VideoFramesConfig::default().page(PageConfig::default().temp_dir(dir.path()));
    let frames = VideoFrames::new(
        MemoryTranscript::with_text(text),
        config,
        Box::new(views.clone()),
        opener,
    );
    (frames, views)
}

/// Children currently in the transcript that are toggle buttons
fn buttons_in_document(frames: &VideoFrames<MemoryTranscript>) -> BTreeSet<ButtonId> {
    let children: BTreeSet<_> = frames.document().children().into_iter().collect();
    frames
        .handles()
        .into_iter()
        .filter(|id| children.contains(&frames.button(*id).unwrap().child()))
        .collect()
}

/// Live handles always match the buttons shown in the transcript
#[test]
fn test_registry_matches_document() {
    let dir = TempDir::new().unwrap();
    let (mut frames, views) = setup("0123456789", &dir, Arc::new(RecordingOpener::new()));

    let mut live = Vec::new();
    for step in 0..24usize {
        if step % 3 == 2 && !live.is_empty() {
            let id = live.remove(step % live.len());
            frames.remove_button(id).unwrap();
        } else {
            let position = (step * 7) % (frames.document().len() + 1);
            let id = frames.insert_button(position, youtube(), YOUTUBE_URL, YOUTUBE_URL.len()).unwrap();
            if step % 2 == 0 {
                frames.toggle(id).unwrap();
            }
            live.push(id);
        }

        let handles: BTreeSet<_> = frames.handles().into_iter().collect();
        assert_eq!(handles, live.iter().copied().collect::<BTreeSet<_>>());
        assert_eq!(buttons_in_document(&frames), handles);

        let expanded = live
            .iter()
            .filter(|id| frames.state(**id).unwrap() == ToggleState::Expanded)
            .count();
        assert_eq!(views.live().len(), expanded);
        assert_eq!(frames.document().children().len(), handles.len() + expanded);
    }

    for id in live {
        frames.remove_button(id).unwrap();
    }
    assert_eq!(frames.document().text(), "0123456789");
    assert_eq!(frames.document().mark_count(), 0);
}

/// Text inserted before a button moves its anchor with it
#[test]
fn test_anchor_follows_edits() {
    let dir = TempDir::new().unwrap();
    let (mut frames, _) = setup("hello world", &dir, Arc::new(RecordingOpener::new()));
    let id = frames.insert_button(5, youtube(), YOUTUBE_URL, YOUTUBE_URL.len()).unwrap();

    frames.document_mut().insert_text(0, ">> ").unwrap();
    let anchor = frames.info(id).unwrap().anchor();
    assert_eq!(frames.document().mark_position(anchor).unwrap(), 8);

    frames.expand(id).unwrap();
    let segments = frames.document().segments();
    assert_eq!(segments[8], Segment::Child(frames.button(id).unwrap().child()));
    assert_eq!(segments[9], Segment::Char('\n'));
    assert!(matches!(segments[10], Segment::Child(_)));

    frames.remove_button(id).unwrap();
    assert_eq!(frames.document().text(), ">> hello world");
}

/// Text typed right before a button carries the button along
#[test]
fn test_edit_at_button_position() {
    let dir = TempDir::new().unwrap();
    let (mut frames, _) = setup("watch this", &dir, Arc::new(RecordingOpener::new()));
    let id = frames.insert_button(5, youtube(), YOUTUBE_URL, YOUTUBE_URL.len()).unwrap();

    frames.document_mut().insert_text(5, "XY").unwrap();
    frames.toggle(id).unwrap();
    assert_eq!(frames.document().text(), "watchXY\u{FFFC}\n\u{FFFC}\n this");

    frames.toggle(id).unwrap();
    frames.remove_button(id).unwrap();
    assert_eq!(frames.document().text(), "watchXY this");
    assert!(frames.document().children().is_empty());
    assert_eq!(frames.document().mark_count(), 0);
}

/// Each of two buttons placed at one position removes only itself
#[test]
fn test_buttons_sharing_a_position() {
    let dir = TempDir::new().unwrap();
    let (mut frames, _) = setup("a b", &dir, Arc::new(RecordingOpener::new()));
    let first = frames.insert_button(1, youtube(), YOUTUBE_URL, YOUTUBE_URL.len()).unwrap();
    let second = frames.insert_button(1, youtube(), YOUTUBE_URL, YOUTUBE_URL.len()).unwrap();
    let first_child = frames.button(first).unwrap().child();
    let second_child = frames.button(second).unwrap().child();
    assert_eq!(frames.document().children(), vec![second_child, first_child]);

    frames.remove_button(first).unwrap();
    assert_eq!(frames.document().children(), vec![second_child]);
    assert_eq!(buttons_in_document(&frames), BTreeSet::from([second]));

    frames.remove_button(second).unwrap();
    assert_eq!(frames.document().text(), "a b");
}

/// Expanding then collapsing restores the transcript exactly
#[test]
fn test_toggle_roundtrip() {
    let dir = TempDir::new().unwrap();
    let (mut frames, _) = setup("look at this one", &dir, Arc::new(RecordingOpener::new()));
    let id = frames.insert_button(7, youtube(), YOUTUBE_URL, YOUTUBE_URL.len()).unwrap();
    let after_insert = frames.document().segments().to_vec();

    for _ in 0..3 {
        frames.toggle(id).unwrap();
        assert_eq!(frames.document().len(), after_insert.len() + 3);
        frames.toggle(id).unwrap();
        assert_eq!(frames.document().segments(), after_insert.as_slice());
    }
}

/// At the end of the transcript the player takes two positions, not three
#[test]
fn test_end_of_text_player() {
    let dir = TempDir::new().unwrap();
    let (mut frames, _) = setup("look: ", &dir, Arc::new(RecordingOpener::new()));
    let id = frames.insert_button(6, youtube(), YOUTUBE_URL, YOUTUBE_URL.len()).unwrap();
    assert!(frames.info(id).unwrap().is_end_of_text());
    let after_insert = frames.document().segments().to_vec();

    frames.expand(id).unwrap();
    assert_eq!(frames.document().len(), after_insert.len() + 2);
    assert_eq!(frames.document().text(), "look: \u{FFFC}\n\u{FFFC}");

    frames.collapse(id).unwrap();
    assert_eq!(frames.document().segments(), after_insert.as_slice());
}

/// Generated pages hold the template with every placeholder substituted
#[test]
fn test_generated_page_contents() {
    let dir = TempDir::new().unwrap();
    let (frames, _) = setup("", &dir, Arc::new(RecordingOpener::new()));
    let website = WebsitePattern::new(
        "clips",
        r"clips\.example/v/(?P<video_id>[A-Za-z0-9]+)",
        r#"<embed src="https://clips.example/e/%VIDEO_ID%"><p>%VIDEO_ID%</p>"#,
    )
    .unwrap();

    let page = frames.generate_page(&website, "https://clips.example/v/Zx81").unwrap();
    assert_eq!(page.video_id, "Zx81");

    let contents = std::fs::read_to_string(&page.path).unwrap();
    assert_eq!(
        contents,
        "<html>\n<head></head>\n<body>\n\
         <embed src=\"https://clips.example/e/Zx81\"><p>Zx81</p>\
         \n</body>\n</html>"
    );

    let file_name = page.path.file_name().unwrap().to_string_lossy().to_string();
    assert!(page.uri.starts_with("file://"));
    assert!(page.uri.ends_with(&file_name));
}

/// Removing an expanded button collapses it first and leaves no residue
#[test]
fn test_remove_while_expanded() {
    let dir = TempDir::new().unwrap();
    let (mut frames, views) = setup("before after", &dir, Arc::new(RecordingOpener::new()));
    let id = frames.insert_button(7, youtube(), YOUTUBE_URL, YOUTUBE_URL.len()).unwrap();
    frames.expand(id).unwrap();
    assert_eq!(frames.document().children().len(), 2);

    frames.remove_button(id).unwrap();
    assert_eq!(frames.document().text(), "before after");
    assert!(frames.document().children().is_empty());
    assert_eq!(views.created().len(), 1);
    assert_eq!(views.destroyed(), views.created());
    assert!(frames.is_empty());
}

/// Players hand new-window requests to the host instead of navigating
#[test]
fn test_new_window_requests_open_externally() {
    let dir = TempDir::new().unwrap();
    let mut opener = MockOpener::new();
    opener
        .expect_open_uri()
        .with(eq("https://www.youtube.com/watch?v=dQw4w9WgXcQ&feature=player_embedded"))
        .times(1)
        .return_const(());

    let (mut frames, views) = setup("see ", &dir, Arc::new(opener));
    let id = frames.insert_button(4, youtube(), YOUTUBE_URL, YOUTUBE_URL.len()).unwrap();
    frames.expand(id).unwrap();

    let player = frames.entry(id).unwrap().frame.as_ref().unwrap().child();
    let decision = views.request_new_window(
        player,
        "https://www.youtube.com/watch?v=dQw4w9WgXcQ&feature=player_embedded",
    );
    assert_eq!(decision, Some(NavigationDecision::Intercept));

    frames.collapse(id).unwrap();
    assert_eq!(views.request_new_window(player, "https://example.com"), None);
}

/// Teardown releases every mark and player but keeps the content
#[test]
fn test_destroy() {
    let dir = TempDir::new().unwrap();
    let (mut frames, views) = setup("a b c", &dir, Arc::new(RecordingOpener::new()));
    let first = frames.insert_button(1, youtube(), YOUTUBE_URL, YOUTUBE_URL.len()).unwrap();
    frames.insert_button(3, youtube(), YOUTUBE_URL, YOUTUBE_URL.len()).unwrap();
    frames.expand(first).unwrap();

    let doc = frames.destroy();
    assert_eq!(doc.mark_count(), 0);
    assert!(views.live().is_empty());
    assert_eq!(doc.children().len(), 3);
}
