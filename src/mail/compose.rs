//! Result email composition.
//!
//! The message layout is fixed: a `multipart/mixed` body with boundary
//! `boundary123`, one plain-text part and one attachment declared
//! `image/jpeg` whatever the image really is.

use chrono::{DateTime, SecondsFormat, Utc};
use lettre::Message;
use lettre::message::header::{ContentDisposition, ContentTransferEncoding, ContentType};
use lettre::message::{Body, Mailbox, MultiPart, SinglePart};

use crate::encoding::decode_image;
use crate::error::MailError;
use crate::mail::OutgoingMail;

/// Multipart boundary token.
pub const BOUNDARY: &str = "boundary123";

/// Declared content type of every attachment.
pub const ATTACHMENT_CONTENT_TYPE: &str = "image/jpeg";

/// Subject line, stamped with the send time in ISO-8601 UTC.
pub fn subject_line(sent_at: DateTime<Utc>) -> String {
    format!(
        "Your AI Image is Ready - {}",
        sent_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Plain-text body naming the attached file.
pub fn body_text(file_name: &str) -> String {
    format!(
        "Halo,\n\
         \n\
         Terima kasih telah menggunakan AI Photobooth Image Generator.\n\
         Hasil foto dapat kamu download di attachment yang ada di email ini.\n\
         \n\
         Nama file:\n\
         {file_name}\n\
         \n\
         Salam,\n\
         Tim AI Photobooth\n"
    )
}

fn mailbox(field: &str, address: &str) -> Result<Mailbox, MailError> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::Address {
        field: field.to_string(),
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// Build the raw result email for one recipient.
///
/// `image` is the face-swap output, either a data URL or bare base64; it is
/// decoded and re-encoded as the attachment body.
pub fn compose_result_email(
    from: &str,
    to: &str,
    file_name: &str,
    image: &str,
    sent_at: DateTime<Utc>,
) -> Result<OutgoingMail, MailError> {
    let subject = subject_line(sent_at);
    let image_bytes = decode_image(image)?;

    let text_part = SinglePart::builder()
        .header(ContentType::TEXT_PLAIN)
        .header(ContentTransferEncoding::SevenBit)
        .body(body_text(file_name));

    let attachment_type = ContentType::parse(ATTACHMENT_CONTENT_TYPE)
        .map_err(|e| MailError::Build(format!("attachment content type: {e}")))?;
    let attachment_body = Body::new_with_encoding(image_bytes, ContentTransferEncoding::Base64)
        .map_err(|_| MailError::Build("attachment could not be base64 encoded".into()))?;
    let attachment_part = SinglePart::builder()
        .header(attachment_type)
        .header(ContentDisposition::attachment(file_name))
        .body(attachment_body);

    let message = Message::builder()
        .from(mailbox("from", from)?)
        .to(mailbox("to", to)?)
        .subject(subject.clone())
        .multipart(
            MultiPart::mixed()
                .boundary(BOUNDARY)
                .singlepart(text_part)
                .singlepart(attachment_part),
        )
        .map_err(|e| MailError::Build(e.to_string()))?;

    Ok(OutgoingMail {
        from: from.to_string(),
        to: to.to_string(),
        subject,
        file_name: file_name.to_string(),
        raw: message.formatted(),
    })
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use chrono::TimeZone;
    use mail_parser::{MessageParser, MimeHeaders};

    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 5, 9, 30, 15).unwrap()
    }

    #[test]
    fn subject_uses_iso_timestamp() {
        assert_eq!(
            subject_line(fixed_time()),
            "Your AI Image is Ready - 2024-10-05T09:30:15.000Z"
        );
    }

    #[test]
    fn body_names_file() {
        let body = body_text("42.png");
        assert!(body.starts_with("Halo,\n\n"));
        assert!(body.contains("Nama file:\n42.png\n"));
        assert!(body.ends_with("Tim AI Photobooth\n"));
    }

    #[test]
    fn raw_message_layout() {
        let payload = BASE64.encode(b"swapped face bytes");
        let mail = compose_result_email(
            "booth@example.com",
            "alice@example.com",
            "42.png",
            &payload,
            fixed_time(),
        )
        .unwrap();

        assert_eq!(mail.from, "booth@example.com");
        assert_eq!(mail.to, "alice@example.com");

        let raw = String::from_utf8(mail.raw.clone()).unwrap();
        assert!(raw.contains("boundary123"));
        assert!(raw.contains("--boundary123--"));
        assert!(raw.contains("Content-Type: image/jpeg"));
        assert!(raw.contains("Content-Transfer-Encoding: base64"));
        assert!(raw.contains("filename=\"42.png\""));
        assert!(raw.contains(&payload));
        assert!(raw.contains("MIME-Version: 1.0"));
    }

    #[test]
    fn parsed_message_round_trips() {
        let image = b"\xff\xd8\xff\xe0 jpeg-ish";
        let mail = compose_result_email(
            "booth@example.com",
            "alice@example.com",
            "photo.gif",
            &format!("data:image/png;base64,{}", BASE64.encode(image)),
            fixed_time(),
        )
        .unwrap();

        let parsed = MessageParser::default().parse(&mail.raw).unwrap();
        assert_eq!(
            parsed.subject(),
            Some("Your AI Image is Ready - 2024-10-05T09:30:15.000Z")
        );
        assert!(parsed.body_text(0).unwrap().contains("photo.gif"));

        let attachment = parsed.attachment(0).unwrap();
        assert_eq!(attachment.attachment_name(), Some("photo.gif"));
        let content_type = attachment.content_type().unwrap();
        assert_eq!(content_type.ctype(), "image");
        assert_eq!(content_type.subtype(), Some("jpeg"));
        assert_eq!(attachment.contents(), image);
    }

    #[test]
    fn invalid_recipient_rejected() {
        let err = compose_result_email(
            "booth@example.com",
            "not-an-address",
            "42.png",
            "QUJD",
            fixed_time(),
        )
        .unwrap_err();
        assert!(matches!(err, MailError::Address { ref field, .. } if field == "to"));
    }

    #[test]
    fn invalid_payload_rejected() {
        let err = compose_result_email(
            "booth@example.com",
            "alice@example.com",
            "42.png",
            "%%% not base64 %%%",
            fixed_time(),
        )
        .unwrap_err();
        assert!(matches!(err, MailError::Attachment(_)));
    }
}
