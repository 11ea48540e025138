use crate::data::ImageRecord;
use crate::error::{FetchError, Result};

const IMAGE_SUFFIXES: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

/// Returns `true` if the record can be shown as a still image.
///
/// A declared `image` media type wins; otherwise the best available URL must
/// end in a known image suffix.
pub fn is_image(record: &ImageRecord) -> bool {
    if record.media_type.trim().eq_ignore_ascii_case("image") {
        return true;
    }
    record.best_url().is_some_and(|url| {
        let url = url.trim().to_ascii_lowercase();
        IMAGE_SUFFIXES.iter().any(|suffix| url.ends_with(suffix))
    })
}

/// Keep only displayable images, in order.
pub fn filter_images(records: Vec<ImageRecord>) -> Result<Vec<ImageRecord>> {
    let images: Vec<ImageRecord> = records.into_iter().filter(is_image).collect();
    if images.is_empty() {
        return Err(FetchError::NoImagesFound);
    }
    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, media_type: &str, url: Option<&str>) -> ImageRecord {
        ImageRecord {
            title: title.into(),
            media_type: media_type.into(),
            url: url.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn keeps_declared_images_and_image_urls() {
        let records = vec![
            record("declared", "image", Some("https://apod.example/a")),
            record("video", "video", Some("https://youtube.example/embed/x")),
            record("untyped", "", Some("https://apod.example/b.png")),
        ];
        let titles: Vec<String> = filter_images(records)
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, ["declared", "untyped"]);
    }

    #[test]
    fn media_type_is_case_insensitive() {
        assert!(is_image(&record("x", "IMAGE", None)));
        assert!(is_image(&record("x", "Image", None)));
    }

    #[test]
    fn suffix_match_is_case_insensitive() {
        assert!(is_image(&record("x", "", Some("https://apod.example/M31.JPG"))));
        assert!(is_image(&record("x", "other", Some("https://apod.example/m31.Jpeg"))));
        assert!(is_image(&record("x", "", Some("https://apod.example/anim.gif"))));
    }

    #[test]
    fn falls_back_to_hd_then_thumbnail() {
        let hd = ImageRecord {
            url: Some("  ".into()),
            hdurl: Some("https://apod.example/hd.png".into()),
            ..Default::default()
        };
        assert!(is_image(&hd));

        let thumb = ImageRecord {
            thumbnail_url: Some("https://apod.example/thumb.jpg".into()),
            ..Default::default()
        };
        assert!(is_image(&thumb));
    }

    #[test]
    fn primary_url_shadows_other_candidates() {
        let record = ImageRecord {
            media_type: "video".into(),
            url: Some("https://youtube.example/embed/x".into()),
            thumbnail_url: Some("https://img.youtube.example/x.jpg".into()),
            ..Default::default()
        };
        assert!(!is_image(&record));
    }

    #[test]
    fn rejects_non_image_suffixes() {
        assert!(!is_image(&record("x", "", Some("https://apod.example/clip.mp4"))));
        assert!(!is_image(&record("x", "", Some("https://apod.example/a.png?size=2"))));
        assert!(!is_image(&record("x", "", None)));
    }

    #[test]
    fn empty_result_is_no_images_found() {
        let records = vec![record("video", "video", Some("https://youtube.example/x"))];
        assert_eq!(filter_images(records).unwrap_err(), FetchError::NoImagesFound);
        assert_eq!(filter_images(Vec::new()).unwrap_err(), FetchError::NoImagesFound);
    }
}
