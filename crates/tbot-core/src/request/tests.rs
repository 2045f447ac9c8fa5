use super::*;
use serde_json::json;

fn field<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[test]
fn test_send_message_payload_omits_unset_fields() {
    let req = Request::from(OutgoingMessage::new(42, "hi"));
    assert_eq!(req.method(), "sendMessage");
    let Payload::Json(body) = req.into_payload().unwrap() else {
        panic!("expected json payload");
    };
    assert_eq!(body, json!({"chat_id": 42, "text": "hi"}));
}

#[test]
fn test_send_message_payload_with_options() {
    let msg = OutgoingMessage::new(ChatTarget::Channel("@news".into()), "*bold*")
        .with_parse_mode(ParseMode::Markdown)
        .with_disable_web_page_preview(true)
        .with_reply_to(7)
        .with_reply_markup(ReplyMarkup::ForceReply { selective: true });
    let Payload::Json(body) = Request::from(msg).into_payload().unwrap() else {
        panic!("expected json payload");
    };
    assert_eq!(
        body,
        json!({
            "chat_id": "@news",
            "text": "*bold*",
            "parse_mode": "Markdown",
            "disable_web_page_preview": true,
            "reply_to_message_id": 7,
            "reply_markup": {"force_reply": true, "selective": true}
        })
    );
}

#[test]
fn test_reply_markup_replaces_previous() {
    let msg = OutgoingMessage::new(1, "x")
        .with_reply_markup(ReplyMarkup::Keyboard(ReplyKeyboardMarkup::new(vec![vec![
            "yes".into(),
            "no".into(),
        ]])))
        .with_reply_markup(ReplyMarkup::HideKeyboard { selective: false });
    assert_eq!(
        serde_json::to_value(msg.base.reply_markup.unwrap()).unwrap(),
        json!({"hide_keyboard": true, "selective": false})
    );
}

#[test]
fn test_keyboard_markup_serialization() {
    let mut keyboard = ReplyKeyboardMarkup::new(vec![vec!["a".into()], vec!["b".into()]]);
    keyboard.one_time_keyboard = true;
    assert_eq!(
        serde_json::to_value(ReplyMarkup::Keyboard(keyboard)).unwrap(),
        json!({
            "keyboard": [["a"], ["b"]],
            "resize_keyboard": false,
            "one_time_keyboard": true,
            "selective": false
        })
    );
}

#[test]
fn test_forward_payload() {
    let origin: Chat = serde_json::from_str(r#"{"id": -77, "type": "group"}"#).unwrap();
    let req = Request::from(OutgoingForward::new(5, &origin, 300));
    assert_eq!(req.method(), "forwardMessage");
    let Payload::Json(body) = req.into_payload().unwrap() else {
        panic!("expected json payload");
    };
    assert_eq!(
        body,
        json!({"chat_id": 5, "from_chat_id": -77, "message_id": 300})
    );
}

#[test]
fn test_chat_action_and_location_payloads() {
    let Payload::Json(body) = Request::from(OutgoingChatAction::new(9, ChatAction::UploadPhoto))
        .into_payload()
        .unwrap()
    else {
        panic!("expected json payload");
    };
    assert_eq!(body, json!({"chat_id": 9, "action": "upload_photo"}));

    let Payload::Json(body) = Request::from(OutgoingLocation::new(9, 52.5, 13.25))
        .into_payload()
        .unwrap()
    else {
        panic!("expected json payload");
    };
    assert_eq!(body, json!({"chat_id": 9, "latitude": 52.5, "longitude": 13.25}));
}

#[test]
fn test_photo_by_file_id_is_json() {
    let req = Request::from(
        OutgoingPhoto::new(3, InputFile::FileId("AgADBAAD".into())).with_caption("cat"),
    );
    assert_eq!(req.method(), "sendPhoto");
    let Payload::Json(body) = req.into_payload().unwrap() else {
        panic!("expected json payload");
    };
    assert_eq!(
        body,
        json!({"chat_id": 3, "photo": "AgADBAAD", "caption": "cat"})
    );
}

#[test]
fn test_photo_from_memory_is_multipart() {
    let file = InputFile::Memory {
        file_name: "cat.png".into(),
        data: vec![1, 2, 3],
    };
    let req = Request::from(
        OutgoingPhoto::new(3, file.clone())
            .with_caption("cat")
            .with_reply_markup(ReplyMarkup::ForceReply { selective: false }),
    );
    match req.into_payload().unwrap() {
        Payload::Multipart {
            fields,
            file_field,
            file: sent,
        } => {
            assert_eq!(file_field, "photo");
            assert_eq!(sent, file);
            assert_eq!(field(&fields, "chat_id"), Some("3"));
            assert_eq!(field(&fields, "caption"), Some("cat"));
            assert_eq!(
                field(&fields, "reply_markup"),
                Some(r#"{"force_reply":true,"selective":false}"#)
            );
            assert_eq!(field(&fields, "photo"), None);
        }
        other => panic!("expected multipart payload, got {other:?}"),
    }
}

#[test]
fn test_audio_from_path_carries_metadata() {
    let req = Request::from(
        OutgoingAudio::new(
            ChatTarget::Channel("@music".into()),
            InputFile::Path("/tmp/song.mp3".into()),
        )
        .with_duration(215)
        .with_performer("Band")
        .with_title("Song"),
    );
    assert_eq!(req.method(), "sendAudio");
    let Payload::Multipart {
        fields, file_field, ..
    } = req.into_payload().unwrap()
    else {
        panic!("expected multipart payload");
    };
    assert_eq!(file_field, "audio");
    assert_eq!(field(&fields, "chat_id"), Some("@music"));
    assert_eq!(field(&fields, "duration"), Some("215"));
    assert_eq!(field(&fields, "performer"), Some("Band"));
    assert_eq!(field(&fields, "title"), Some("Song"));
}

#[test]
fn test_method_names_for_media() {
    let file = || InputFile::FileId("f".into());
    assert_eq!(Request::from(OutgoingDocument::new(1, file())).method(), "sendDocument");
    assert_eq!(Request::from(OutgoingSticker::new(1, file())).method(), "sendSticker");
    assert_eq!(Request::from(OutgoingVideo::new(1, file())).method(), "sendVideo");
    assert_eq!(Request::from(OutgoingVoice::new(1, file())).method(), "sendVoice");
}

#[test]
fn test_profile_photos_and_get_file_payloads() {
    let req = Request::from(UserProfilePhotosRequest::new(11).with_limit(5));
    assert_eq!(req.method(), "getUserProfilePhotos");
    let Payload::Json(body) = req.into_payload().unwrap() else {
        panic!("expected json payload");
    };
    assert_eq!(body, json!({"user_id": 11, "limit": 5}));

    let req = Request::from(GetFileRequest {
        file_id: "abc".into(),
    });
    assert_eq!(req.method(), "getFile");
    let Payload::Json(body) = req.into_payload().unwrap() else {
        panic!("expected json payload");
    };
    assert_eq!(body, json!({"file_id": "abc"}));
}

#[test]
fn test_input_file_debug_hides_bytes() {
    let file = InputFile::Memory {
        file_name: "a.bin".into(),
        data: vec![0; 1024],
    };
    let dbg = format!("{file:?}");
    assert!(dbg.contains("len: 1024"));
    assert!(!dbg.contains("0, 0"));
}
