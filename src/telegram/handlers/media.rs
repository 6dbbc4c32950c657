//! Media attachment handler: archives photo/video/document file references

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::{Message, PhotoSize, ReplyParameters};

use super::types::{sender_id, HandlerDeps, HandlerError};
use crate::storage::MediaType;

pub(crate) const MEDIA_SAVED: &str = "Information of media has been saved successfully!";

/// Handler for photo/video/document attachments.
///
/// Stores one file reference per message and confirms with a reply to the
/// triggering message. The insert happens whether or not the sender ever
/// completed onboarding.
pub(super) fn media_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.photo().is_some() || msg.video().is_some() || msg.document().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let user_id = sender_id(&msg);

                let Some((file_id, file_type)) = extract_attachment(&msg) else {
                    // The filter above admits only the three media kinds, so
                    // reaching this branch means the routing predicate and
                    // the extraction disagree. Refuse to persist a null row.
                    log::error!(
                        "Media handler matched message {} from chat {} without a usable attachment",
                        msg.id.0,
                        msg.chat.id
                    );
                    return Ok(());
                };

                deps.store.insert_media(user_id, &file_id, file_type).await?;
                log::info!("Stored {} {} for user {}", file_type, file_id, user_id);

                bot.send_message(msg.chat.id, MEDIA_SAVED)
                    .reply_parameters(ReplyParameters::new(msg.id))
                    .await?;

                Ok(())
            }
        })
}

/// Picks the single file reference to store from the message.
pub(crate) fn extract_attachment(msg: &Message) -> Option<(String, MediaType)> {
    if let Some(photos) = msg.photo() {
        best_photo(photos).map(|p| (p.file.id.0.clone(), MediaType::Photo))
    } else if let Some(video) = msg.video() {
        Some((video.file.id.0.clone(), MediaType::Video))
    } else if let Some(doc) = msg.document() {
        Some((doc.file.id.0.clone(), MediaType::Document))
    } else {
        None
    }
}

/// Telegram delivers several downscaled variants per photo; keep the one
/// with the largest pixel area.
pub(crate) fn best_photo(photos: &[PhotoSize]) -> Option<&PhotoSize> {
    photos.iter().max_by_key(|p| p.width * p.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::{FileId, FileMeta, FileUniqueId};

    fn photo(file_id: &str, width: u32, height: u32) -> PhotoSize {
        PhotoSize {
            file: FileMeta {
                id: FileId(file_id.to_string()),
                unique_id: FileUniqueId(format!("u-{}", file_id)),
                size: 0,
            },
            width,
            height,
        }
    }

    #[test]
    fn test_best_photo_prefers_largest_area() {
        let variants = vec![photo("thumb", 90, 60), photo("full", 1280, 960), photo("medium", 320, 240)];

        let best = best_photo(&variants).expect("non-empty variant list");
        assert_eq!(best.file.id.0, "full");
    }

    #[test]
    fn test_best_photo_empty_list() {
        assert!(best_photo(&[]).is_none());
    }

    #[test]
    fn test_best_photo_single_variant() {
        let variants = vec![photo("only", 100, 100)];
        assert_eq!(best_photo(&variants).map(|p| p.file.id.0.as_str()), Some("only"));
    }
}
