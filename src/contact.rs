//! Contact form state machine.
//!
//! `idle -> sending -> success -> idle`. Entering `sending` requires all four
//! fields to be non-blank; a rejected submit stays `idle` and raises a
//! missing-fields notice instead. Nothing here knows about timers: the caller
//! schedules `complete_send` after the simulated delay and `dismiss_notice`
//! after the notice timeout, passing back the ids it was handed.

use serde::Serialize;
use serde_json::json;

use crate::error::{PageError, PageResult};
use crate::logging::{log_event, LogLevel};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Your Name",
            Self::Email => "Email",
            Self::Subject => "Subject",
            Self::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "John Doe",
            Self::Email => "you@example.com",
            Self::Subject => "Project idea…",
            Self::Message => "Tell me about your goals…",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        };
        *slot = value;
    }

    pub fn missing(&self) -> Vec<ContactField> {
        ContactField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        ContactField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmitStatus {
    #[default]
    Idle,
    Sending,
    Success,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    MissingFields,
    Sent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self.kind {
            NoticeKind::MissingFields => "Missing fields",
            NoticeKind::Sent => "Message sent",
        }
    }

    pub fn description(&self) -> &'static str {
        match self.kind {
            NoticeKind::MissingFields => "Please fill out all required fields.",
            NoticeKind::Sent => "Thanks! I’ll reply within hours.",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SendTicket(u64);

impl SendTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    fields: ContactFields,
    status: SubmitStatus,
    notice: Option<Notice>,
    pending: Option<SendTicket>,
    next_id: u64,
}

impl ContactForm {
    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn status(&self) -> SubmitStatus {
        self.status
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn pending(&self) -> Option<SendTicket> {
        self.pending
    }

    pub fn is_sending(&self) -> bool {
        self.status() == SubmitStatus::Sending
    }

    fn issue_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn raise(&mut self, kind: NoticeKind) -> Notice {
        let notice = Notice {
            id: self.issue_id(),
            kind,
        };
        self.notice = Some(notice);
        notice
    }

    pub fn edit(&mut self, field: ContactField, value: String) {
        self.fields.set(field, value);
        if self.status() == SubmitStatus::Success {
            self.status = SubmitStatus::Idle;
        }
    }

    pub fn submit(&mut self) -> PageResult<SendTicket> {
        if self.is_sending() {
            return Err(PageError::AlreadySending);
        }

        let missing = self.fields.missing();
        if !missing.is_empty() {
            self.status = SubmitStatus::Idle;
            self.raise(NoticeKind::MissingFields);
            log_event(
                LogLevel::Info,
                "contact_submit_rejected",
                json!({ "missing": &missing }),
            );
            return Err(PageError::MissingFields(missing));
        }

        let ticket = SendTicket(self.issue_id());
        self.status = SubmitStatus::Sending;
        self.notice = None;
        self.pending = Some(ticket);
        log_event(
            LogLevel::Info,
            "contact_send_started",
            json!({ "ticket": ticket.id() }),
        );
        Ok(ticket)
    }

    /// Finishes the send identified by `ticket`. Stale tickets are ignored.
    pub fn complete_send(&mut self, ticket: SendTicket) -> Option<Notice> {
        if self.pending != Some(ticket) {
            return None;
        }

        self.pending = None;
        self.status = SubmitStatus::Success;
        self.fields = ContactFields::default();
        let notice = self.raise(NoticeKind::Sent);
        log_event(
            LogLevel::Info,
            "contact_send_completed",
            json!({ "ticket": ticket.id() }),
        );
        Some(notice)
    }

    /// Clears the notice only if it is still the one `id` refers to.
    pub fn dismiss_notice(&mut self, id: u64) -> bool {
        match self.notice {
            Some(notice) if notice.id == id => {
                self.notice = None;
                if self.status() == SubmitStatus::Success {
                    self.status = SubmitStatus::Idle;
                }
                log_event(
                    LogLevel::Debug,
                    "notice_dismissed",
                    json!({ "id": id, "kind": notice.kind }),
                );
                true
            }
            _ => false,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::default();
        form.edit(ContactField::Name, "Jane".to_string());
        form.edit(ContactField::Email, "jane@x.com".to_string());
        form.edit(ContactField::Subject, "Hi".to_string());
        form.edit(ContactField::Message, "Hello".to_string());
        form
    }

    #[test]
    fn complete_submission_goes_sending_then_success_and_clears() {
        let mut form = filled();

        let ticket = form.submit().expect("all fields populated");
        assert_eq!(form.status(), SubmitStatus::Sending);
        assert_eq!(form.fields().name, "Jane");

        let notice = form.complete_send(ticket).expect("ticket is current");
        assert_eq!(form.status(), SubmitStatus::Success);
        assert_eq!(notice.kind, NoticeKind::Sent);
        assert!(form.fields().is_empty());
    }

    #[test]
    fn any_single_empty_field_blocks_sending() {
        for field in ContactField::ALL {
            let mut form = filled();
            form.edit(field, "   ".to_string());

            let result = form.submit();

            assert_eq!(result, Err(PageError::MissingFields(vec![field])));
            assert_eq!(form.status(), SubmitStatus::Idle);
            assert_eq!(
                form.notice().map(|notice| notice.kind),
                Some(NoticeKind::MissingFields)
            );
            assert_eq!(form.pending(), None);
        }
    }

    #[test]
    fn empty_name_keeps_form_idle_and_fields_intact() {
        let mut form = filled();
        form.edit(ContactField::Name, String::new());

        assert!(form.submit().is_err());
        assert_eq!(form.status(), SubmitStatus::Idle);
        assert_eq!(form.fields().email, "jane@x.com");
    }

    #[test]
    fn submit_while_sending_is_rejected() {
        let mut form = filled();
        let ticket = form.submit().expect("first submit");

        assert_eq!(form.submit(), Err(PageError::AlreadySending));
        assert_eq!(form.pending(), Some(ticket));
    }

    #[test]
    fn success_notice_dismisses_once_and_returns_to_idle() {
        let mut form = filled();
        let ticket = form.submit().expect("submit");
        let notice = form.complete_send(ticket).expect("complete");

        assert!(form.dismiss_notice(notice.id));
        assert_eq!(form.notice(), None);
        assert_eq!(form.status(), SubmitStatus::Idle);

        // a repeated timer does not bring anything back
        assert!(!form.dismiss_notice(notice.id));
        assert_eq!(form.notice(), None);
    }

    #[test]
    fn stale_dismiss_does_not_clear_newer_notice() {
        let mut form = ContactForm::default();
        assert!(form.submit().is_err());
        let first = form.notice().expect("missing fields notice");
        assert!(form.submit().is_err());
        let second = form.notice().expect("second notice");

        assert!(!form.dismiss_notice(first.id));
        assert_eq!(form.notice(), Some(second));
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let mut form = filled();
        let first = form.submit().expect("first submit");
        form.complete_send(first).expect("first completes");

        for field in ContactField::ALL {
            form.edit(field, "again".to_string());
        }
        let second = form.submit().expect("second submit");

        // a timer left over from the first send must not finish the second
        assert_eq!(form.complete_send(first), None);
        assert_eq!(form.status(), SubmitStatus::Sending);
        assert_eq!(form.pending(), Some(second));
    }

    #[test]
    fn notices_carry_toast_text() {
        let mut form = ContactForm::default();
        assert!(form.submit().is_err());
        let notice = form.notice().expect("missing fields notice");

        assert_eq!(notice.title(), "Missing fields");
        assert_eq!(notice.description(), "Please fill out all required fields.");
    }

    #[test]
    fn every_field_has_label_and_placeholder() {
        for field in ContactField::ALL {
            assert!(!field.label().is_empty(), "{}", field.as_str());
            assert!(!field.placeholder().is_empty(), "{}", field.as_str());
        }
        assert_eq!(ContactField::Name.label(), "Your Name");
    }

    #[test]
    fn editing_after_success_returns_to_idle() {
        let mut form = filled();
        let ticket = form.submit().expect("submit");
        form.complete_send(ticket);

        form.edit(ContactField::Name, "J".to_string());
        assert_eq!(form.status(), SubmitStatus::Idle);
        assert!(form.notice().is_some());
    }
}
