use std::io::Cursor;
use std::path::Path;

use image::ImageFormat;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{FileMeta, InputFile};

use crate::errors::BotError;
use crate::handlers::reply_error;
use crate::types::{BotType, HandlerResult};

// getFile refuses anything bigger than this anyway.
const MAX_DOWNLOAD_BYTES: u32 = 20_000_000;

struct ConvertTarget {
    file: FileMeta,
    source_name: Option<String>,
}

impl ConvertTarget {
    fn from_message(msg: &Message) -> Option<Self> {
        if let Some(doc) = msg.document() {
            return Some(ConvertTarget {
                file: doc.file.clone(),
                source_name: doc.file_name.clone(),
            });
        }

        // Telegram sends several sizes per photo, the last one is the
        // original resolution.
        let photo = msg.photo()?.last()?;
        Some(ConvertTarget {
            file: photo.file.clone(),
            source_name: None,
        })
    }
}

/// Endpoint for any message carrying a photo or a document: download it,
/// re-encode as PNG and send it back.
pub async fn receive_attachment(bot: BotType, msg: Message) -> HandlerResult {
    let Some(target) = ConvertTarget::from_message(&msg) else {
        return Ok(());
    };

    if target.file.size > MAX_DOWNLOAD_BYTES {
        bot.send_message(msg.chat.id, "That file is too large to convert (20 MB limit).")
            .await?;
        return Ok(());
    }

    log::debug!(
        "Converting file {:?} ({} bytes) for chat {}",
        target.file.unique_id,
        target.file.size,
        msg.chat.id
    );

    match fetch_and_convert(&bot, &target.file).await {
        Ok(png) => {
            let name = output_name(target.source_name.as_deref());
            bot.send_document(msg.chat.id, InputFile::memory(png).file_name(name))
                .await?;
        }
        Err(err) => {
            reply_error(&bot, msg.chat.id, err).await?;
        }
    }

    Ok(())
}

async fn fetch_and_convert(bot: &BotType, file: &FileMeta) -> Result<Vec<u8>, BotError> {
    let remote = bot.get_file(file.id.clone()).await?;

    let mut data = Vec::new();
    bot.download_file(&remote.path, &mut data).await?;

    Ok(convert_to_png(&data)?)
}

/// Decode whatever the user sent and re-encode it as PNG, entirely in
/// memory. Dimensions carry over untouched.
fn convert_to_png(data: &[u8]) -> Result<Vec<u8>, image::ImageError> {
    let decoded = image::load_from_memory(data)?;

    let mut out = Vec::new();
    decoded.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)?;
    Ok(out)
}

/// Documents keep their stem, bare photos have no name to keep.
fn output_name(source_name: Option<&str>) -> String {
    let stem = source_name
        .and_then(|name| Path::new(name).file_stem())
        .and_then(|stem| stem.to_str())
        .unwrap_or("photo");
    format!("{stem}.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;

    fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([120, 40, 200]));
        let mut jpeg = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut jpeg), ImageFormat::Jpeg)
            .unwrap();
        jpeg
    }

    #[test]
    fn jpeg_round_trips_to_png_with_the_same_dimensions() {
        let png = convert_to_png(&sample_jpeg(13, 7)).unwrap();

        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
        assert_eq!(decoded.dimensions(), (13, 7));
    }

    #[test]
    fn non_image_input_is_rejected() {
        assert!(convert_to_png(b"this is a text file, not an image").is_err());
    }

    #[test]
    fn documents_keep_their_stem() {
        assert_eq!(output_name(Some("holiday.heic")), "holiday.png");
        assert_eq!(output_name(Some("archive.tar.gz")), "archive.tar.png");
    }

    #[test]
    fn photos_fall_back_to_a_fixed_name() {
        assert_eq!(output_name(None), "photo.png");
    }
}
