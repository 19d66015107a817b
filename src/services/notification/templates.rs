//! HTML email bodies for application events.

use chrono::Utc;

use super::{ApplicationEvent, ApplicationNotification};

const CONTAINER_STYLE: &str = "font-family: 'Segoe UI', Arial, sans-serif; line-height: 1.6; \
color: #333; max-width: 600px; margin: 0 auto; padding: 20px; background-color: #ffffff; \
border: 1px solid #e0e0e0; border-radius: 8px;";

const RULE_STYLE: &str = "border: none; border-top: 1px solid #ccc; margin: 20px 0;";

const FOOTER: &str = "<p style=\"font-size: 0.85em; color: #666;\">\
This message was sent to you because you applied for a bursary through the Bursary Portal. \
If you believe this was a mistake, please disregard this email or contact support.</p>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
}

/// Render the subject and HTML body for a notification
pub fn render(notification: &ApplicationNotification) -> RenderedEmail {
    let name = escape_html(&notification.recipient_name);
    let title = escape_html(&notification.bursary_title);
    let date = Utc::now().format("%B %-d, %Y at %H:%M UTC").to_string();

    let (subject, heading, colour, content) = match &notification.event {
        ApplicationEvent::Submitted => (
            "Bursary Application Confirmation",
            "Bursary Application Received",
            "#2d6cdf",
            format!(
                "<p>We have successfully received your application for the following bursary:</p>\
                 <p style=\"font-size: 1.1em; font-weight: bold;\">{title}</p>\
                 <p>Your application is now under review by the bursary administrators. \
                 You will be contacted should any additional information be required or once a decision is made.</p>\
                 <p style=\"font-size: 0.9em; color: #555;\">Submitted on: {date}</p>\
                 <hr style=\"{RULE_STYLE}\" />\
                 <h4>Data Protection &amp; Privacy</h4>\
                 <p>In compliance with the <strong>Protection of Personal Information Act (POPIA)</strong>, \
                 your personal data is stored securely, used solely for processing your bursary application, \
                 and removable upon your written request.</p>"
            ),
        ),
        ApplicationEvent::Withdrawn => (
            "Bursary Application Withdrawn",
            "Bursary Application Withdrawn",
            "#c0392b",
            format!(
                "<p>This is to confirm that your application for the bursary titled:</p>\
                 <p style=\"font-size: 1.1em; font-weight: bold;\">{title}</p>\
                 <p>has been successfully withdrawn from the Bursary Portal system.</p>\
                 <p style=\"font-size: 0.9em; color: #555;\">Withdrawn on: {date}</p>\
                 <hr style=\"{RULE_STYLE}\" />\
                 <h4>Data Retention &amp; Privacy</h4>\
                 <p>As per POPIA guidelines you may request permanent removal of your data \
                 by contacting the bursary administrator.</p>"
            ),
        ),
        ApplicationEvent::StatusChanged { status, remarks } => {
            let remarks_block = remarks
                .as_deref()
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .map(|r| format!("<p><strong>Remarks:</strong> {}</p>", escape_html(r)))
                .unwrap_or_default();
            (
                "Bursary Application Status Update",
                "Application Status Updated",
                "#2d6cdf",
                format!(
                    "<p>The status of your application for the bursary titled:</p>\
                     <p style=\"font-size: 1.1em; font-weight: bold;\">{title}</p>\
                     <p>has been updated to <strong>{}</strong>.</p>\
                     {remarks_block}\
                     <p style=\"font-size: 0.9em; color: #555;\">Updated on: {date}</p>",
                    escape_html(status)
                ),
            )
        }
    };

    let html = format!(
        "<div style=\"{CONTAINER_STYLE}\">\
         <h2 style=\"color: {colour};\">{heading}</h2>\
         <p>Dear <strong>{name}</strong>,</p>\
         {content}\
         <hr style=\"{RULE_STYLE}\" />\
         <p>Should you have any questions, feel free to reply to this email.</p>\
         <p style=\"margin-top: 30px;\">Kind regards,<br /><strong>Bursary Portal Team</strong></p>\
         {FOOTER}\
         </div>"
    );

    RenderedEmail {
        subject: subject.to_string(),
        html,
    }
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(event: ApplicationEvent) -> ApplicationNotification {
        ApplicationNotification {
            recipient_email: "lerato@example.com".to_string(),
            recipient_name: "Lerato".to_string(),
            bursary_title: "Medical Sciences Fund".to_string(),
            event,
        }
    }

    #[test]
    fn test_submitted_email() {
        let email = render(&notification(ApplicationEvent::Submitted));
        assert_eq!(email.subject, "Bursary Application Confirmation");
        assert!(email.html.contains("Dear <strong>Lerato</strong>"));
        assert!(email.html.contains("Medical Sciences Fund"));
    }

    #[test]
    fn test_withdrawn_email() {
        let email = render(&notification(ApplicationEvent::Withdrawn));
        assert_eq!(email.subject, "Bursary Application Withdrawn");
        assert!(email.html.contains("successfully withdrawn"));
    }

    #[test]
    fn test_status_email_includes_status_and_remarks() {
        let email = render(&notification(ApplicationEvent::StatusChanged {
            status: "Under Review".to_string(),
            remarks: Some("Awaiting transcript".to_string()),
        }));
        assert_eq!(email.subject, "Bursary Application Status Update");
        assert!(email.html.contains("<strong>Under Review</strong>"));
        assert!(email.html.contains("Awaiting transcript"));
    }

    #[test]
    fn test_blank_remarks_are_omitted() {
        let email = render(&notification(ApplicationEvent::StatusChanged {
            status: "Approved".to_string(),
            remarks: Some("   ".to_string()),
        }));
        assert!(!email.html.contains("Remarks:"));
    }

    #[test]
    fn test_user_content_is_escaped() {
        let mut n = notification(ApplicationEvent::StatusChanged {
            status: "<b>Approved</b>".to_string(),
            remarks: Some("<script>alert(1)</script>".to_string()),
        });
        n.recipient_name = "O'Neil & Co".to_string();

        let email = render(&n);
        assert!(!email.html.contains("<script>"));
        assert!(email.html.contains("&lt;b&gt;Approved&lt;/b&gt;"));
        assert!(email.html.contains("O&#39;Neil &amp; Co"));
    }
}
