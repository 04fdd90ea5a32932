use once_cell::sync::Lazy;
use tera::{Context, Tera};

use crate::domain::SubscriberEmail;

pub const WELCOME_SUBJECT: &str = "Welcome to the a68 newsletter";
pub const OWNER_NOTICE_SUBJECT: &str = "New newsletter signup";

static EMAIL_TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (
            "welcome.html",
            include_str!("../../../templates/emails/welcome.html"),
        ),
        (
            "welcome.txt",
            include_str!("../../../templates/emails/welcome.txt"),
        ),
        (
            "owner_notice.html",
            include_str!("../../../templates/emails/owner_notice.html"),
        ),
        (
            "owner_notice.txt",
            include_str!("../../../templates/emails/owner_notice.txt"),
        ),
    ])
    .expect("Failed to parse email templates");
    tera
});

pub struct EmailContent {
    pub subject: &'static str,
    pub html: String,
    pub text: String,
}

pub fn welcome_email() -> Result<EmailContent, tera::Error> {
    let ctx = Context::new();
    Ok(EmailContent {
        subject: WELCOME_SUBJECT,
        html: EMAIL_TEMPLATES.render("welcome.html", &ctx)?,
        text: EMAIL_TEMPLATES.render("welcome.txt", &ctx)?,
    })
}

/// `.html` templates are autoescaped, so the address cannot inject markup.
pub fn owner_notice_email(subscriber: &SubscriberEmail) -> Result<EmailContent, tera::Error> {
    let mut ctx = Context::new();
    ctx.insert("email", subscriber.as_ref());
    Ok(EmailContent {
        subject: OWNER_NOTICE_SUBJECT,
        html: EMAIL_TEMPLATES.render("owner_notice.html", &ctx)?,
        text: EMAIL_TEMPLATES.render("owner_notice.txt", &ctx)?,
    })
}
