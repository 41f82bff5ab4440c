//! Externally triggered birthday notifications.
//!
//! The run is strictly sequential and never scheduled in-process; an
//! operator or an external scheduler hits the trigger endpoint. Failures
//! are contained per item: one member's failed send, or one
//! organization's failed member query, is logged and counted but never
//! aborts the rest of the run.

use crate::dto::{MessageReceipt, SendMessageRequest};
use crate::messaging::MessageService;
use async_trait::async_trait;
use caresphere_core::{effects, CareResult, Member, MessageType, Organization};
use caresphere_repository::traits::{MemberRepository, OrganizationRepository};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use utoipa::ToSchema;

/// Summary of one birthday fan-out run.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BirthdayRunReport {
    pub date: NaiveDate,
    pub organizations: u32,
    pub members_matched: u32,
    pub sent: u32,
    pub failed: u32,
    /// Members with a birthday but no email or phone on file.
    pub skipped: u32,
}

/// One-shot birthday fan-out across all active organizations.
#[async_trait]
pub trait BirthdayNotificationService: Send + Sync {
    /// Runs the fan-out for `date`, defaulting to today.
    async fn run(&self, date: Option<NaiveDate>) -> CareResult<BirthdayRunReport>;
}

/// Default implementation over the member roster and message service.
pub struct BirthdayNotificationServiceImpl {
    organizations: Arc<dyn OrganizationRepository>,
    members: Arc<dyn MemberRepository>,
    messages: Arc<dyn MessageService>,
}

impl BirthdayNotificationServiceImpl {
    #[must_use]
    pub fn new(
        organizations: Arc<dyn OrganizationRepository>,
        members: Arc<dyn MemberRepository>,
        messages: Arc<dyn MessageService>,
    ) -> Self {
        Self {
            organizations,
            members,
            messages,
        }
    }
}

#[async_trait]
impl BirthdayNotificationService for BirthdayNotificationServiceImpl {
    async fn run(&self, date: Option<NaiveDate>) -> CareResult<BirthdayRunReport> {
        let date = date.unwrap_or_else(|| Utc::now().date_naive());
        info!("Running birthday notifications for {}", date);

        let organizations = self.organizations.list_active().await?;
        let mut report = BirthdayRunReport {
            date,
            organizations: organizations.len() as u32,
            members_matched: 0,
            sent: 0,
            failed: 0,
            skipped: 0,
        };

        for organization in &organizations {
            let Some(members) = effects::log_on_error(
                "birthday_member_lookup",
                self.members.find_active_with_birthday(organization.id, date),
            )
            .await
            else {
                continue;
            };

            for member in members {
                report.members_matched += 1;
                let Some(request) = birthday_message(organization, &member) else {
                    debug!("No contact details for {}, skipping", member.full_name());
                    report.skipped += 1;
                    continue;
                };

                match effects::log_on_error("birthday_send", self.messages.send(request)).await {
                    Some(MessageReceipt { message_id, .. }) => {
                        debug!("Birthday message queued for {}: {}", member.full_name(), message_id);
                        report.sent += 1;
                    }
                    None => report.failed += 1,
                }
            }
        }

        info!(
            "Birthday run for {} complete: {} matched, {} sent, {} failed, {} skipped",
            date, report.members_matched, report.sent, report.failed, report.skipped
        );
        Ok(report)
    }
}

/// Builds the greeting for one member, email first, SMS as fallback.
/// Returns `None` when the member has no usable contact detail.
fn birthday_message(organization: &Organization, member: &Member) -> Option<SendMessageRequest> {
    let greeting = format!("Happy birthday, {}!", member.first_name);
    let body = format!(
        "The whole {} family celebrates with you today.",
        organization.name
    );

    if let Some(email) = &member.email {
        return Some(SendMessageRequest {
            message_type: MessageType::Email,
            to: email.clone(),
            subject: Some(greeting),
            body: Some(body),
            from: None,
            from_name: None,
            user_id: None,
            organization_id: Some(organization.id),
        });
    }
    if let Some(phone) = &member.phone {
        return Some(SendMessageRequest {
            message_type: MessageType::Sms,
            to: phone.clone(),
            subject: None,
            body: Some(format!("{} {}", greeting, body)),
            from: None,
            from_name: None,
            user_id: None,
            organization_id: Some(organization.id),
        });
    }
    None
}

impl std::fmt::Debug for BirthdayNotificationServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BirthdayNotificationServiceImpl")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caresphere_core::{CareError, OrganizationId};
    use std::collections::HashSet;
    use std::sync::Mutex;

    struct InMemoryOrgRepo {
        organizations: Vec<Organization>,
    }

    #[async_trait]
    impl OrganizationRepository for InMemoryOrgRepo {
        async fn find_by_id(&self, id: OrganizationId) -> CareResult<Option<Organization>> {
            Ok(self.organizations.iter().find(|o| o.id == id).cloned())
        }

        async fn list_active(&self) -> CareResult<Vec<Organization>> {
            Ok(self
                .organizations
                .iter()
                .filter(|o| o.is_active())
                .cloned()
                .collect())
        }
    }

    #[derive(Default)]
    struct InMemoryMemberRepo {
        members: Vec<Member>,
        fail_for: Option<OrganizationId>,
    }

    #[async_trait]
    impl MemberRepository for InMemoryMemberRepo {
        async fn find_active_with_birthday(
            &self,
            organization_id: OrganizationId,
            date: NaiveDate,
        ) -> CareResult<Vec<Member>> {
            if self.fail_for == Some(organization_id) {
                return Err(CareError::Database("connection reset".to_string()));
            }
            Ok(self
                .members
                .iter()
                .filter(|m| {
                    m.organization_id == organization_id
                        && m.is_active()
                        && m.has_birthday_on(date)
                })
                .cloned()
                .collect())
        }
    }

    /// Message service double that fails for selected recipients.
    #[derive(Default)]
    struct FlakyMessageService {
        sent_to: Mutex<Vec<String>>,
        fail_for: HashSet<String>,
    }

    #[async_trait]
    impl MessageService for FlakyMessageService {
        async fn send(&self, request: SendMessageRequest) -> CareResult<MessageReceipt> {
            if self.fail_for.contains(&request.to) {
                return Err(CareError::external_service("messaging-api", "rejected"));
            }
            self.sent_to.lock().unwrap().push(request.to.clone());
            Ok(MessageReceipt {
                message_id: format!("msg-{}", request.to),
                queued_at: Utc::now(),
            })
        }
    }

    fn member_with_birthday(
        organization_id: OrganizationId,
        first_name: &str,
        email: Option<&str>,
        birth: NaiveDate,
    ) -> Member {
        let mut member = Member::new(
            organization_id,
            first_name,
            None,
            email.map(String::from),
        );
        member.birth_date = Some(birth);
        member
    }

    fn june_2() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
    }

    fn born_june_2() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 6, 2).unwrap()
    }

    fn service(
        organizations: Vec<Organization>,
        members: InMemoryMemberRepo,
        messages: FlakyMessageService,
    ) -> (Arc<FlakyMessageService>, BirthdayNotificationServiceImpl) {
        let messages = Arc::new(messages);
        let service = BirthdayNotificationServiceImpl::new(
            Arc::new(InMemoryOrgRepo { organizations }),
            Arc::new(members),
            Arc::clone(&messages) as Arc<dyn MessageService>,
        );
        (messages, service)
    }

    #[tokio::test]
    async fn test_sends_to_every_matching_member() {
        let org_a = Organization::new("Grace Chapel");
        let org_b = Organization::new("Hope Fellowship");
        let members = InMemoryMemberRepo {
            members: vec![
                member_with_birthday(org_a.id, "Dana", Some("dana@example.org"), born_june_2()),
                member_with_birthday(org_b.id, "Lee", Some("lee@example.org"), born_june_2()),
                // Birthday on another day, must not match.
                member_with_birthday(
                    org_a.id,
                    "Sam",
                    Some("sam@example.org"),
                    NaiveDate::from_ymd_opt(1985, 12, 24).unwrap(),
                ),
            ],
            fail_for: None,
        };
        let (messages, service) =
            service(vec![org_a, org_b], members, FlakyMessageService::default());

        let report = service.run(Some(june_2())).await.unwrap();

        assert_eq!(report.organizations, 2);
        assert_eq!(report.members_matched, 2);
        assert_eq!(report.sent, 2);
        assert_eq!(report.failed, 0);
        let sent_to = messages.sent_to.lock().unwrap();
        assert!(sent_to.contains(&"dana@example.org".to_string()));
        assert!(sent_to.contains(&"lee@example.org".to_string()));
    }

    #[tokio::test]
    async fn test_one_failed_send_does_not_stop_the_run() {
        let org = Organization::new("Grace Chapel");
        let members = InMemoryMemberRepo {
            members: vec![
                member_with_birthday(org.id, "Dana", Some("dana@example.org"), born_june_2()),
                member_with_birthday(org.id, "Lee", Some("lee@example.org"), born_june_2()),
            ],
            fail_for: None,
        };
        let mut messages = FlakyMessageService::default();
        messages.fail_for.insert("dana@example.org".to_string());
        let (messages, service) = service(vec![org], members, messages);

        let report = service.run(Some(june_2())).await.unwrap();

        assert_eq!(report.sent, 1);
        assert_eq!(report.failed, 1);
        assert_eq!(
            messages.sent_to.lock().unwrap().as_slice(),
            ["lee@example.org".to_string()]
        );
    }

    #[tokio::test]
    async fn test_failed_member_lookup_skips_organization_only() {
        let org_a = Organization::new("Grace Chapel");
        let org_b = Organization::new("Hope Fellowship");
        let members = InMemoryMemberRepo {
            members: vec![
                member_with_birthday(org_a.id, "Dana", Some("dana@example.org"), born_june_2()),
                member_with_birthday(org_b.id, "Lee", Some("lee@example.org"), born_june_2()),
            ],
            fail_for: Some(org_a.id),
        };
        let (messages, service) =
            service(vec![org_a, org_b], members, FlakyMessageService::default());

        let report = service.run(Some(june_2())).await.unwrap();

        assert_eq!(report.sent, 1);
        assert_eq!(
            messages.sent_to.lock().unwrap().as_slice(),
            ["lee@example.org".to_string()]
        );
    }

    #[tokio::test]
    async fn test_member_without_contact_details_is_skipped() {
        let org = Organization::new("Grace Chapel");
        let members = InMemoryMemberRepo {
            members: vec![member_with_birthday(org.id, "Dana", None, born_june_2())],
            fail_for: None,
        };
        let (messages, service) = service(vec![org], members, FlakyMessageService::default());

        let report = service.run(Some(june_2())).await.unwrap();

        assert_eq!(report.members_matched, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.sent, 0);
        assert!(messages.sent_to.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_member_with_phone_only_gets_sms() {
        let org = Organization::new("Grace Chapel");
        let mut member = member_with_birthday(org.id, "Dana", None, born_june_2());
        member.phone = Some("+15550001111".to_string());
        let members = InMemoryMemberRepo {
            members: vec![member],
            fail_for: None,
        };
        let (messages, service) = service(vec![org], members, FlakyMessageService::default());

        let report = service.run(Some(june_2())).await.unwrap();

        assert_eq!(report.sent, 1);
        assert_eq!(
            messages.sent_to.lock().unwrap().as_slice(),
            ["+15550001111".to_string()]
        );
    }

    #[tokio::test]
    async fn test_messages_carry_organization_context() {
        let org = Organization::new("Grace Chapel");
        let org_id = org.id;
        let members = InMemoryMemberRepo {
            members: vec![member_with_birthday(
                org_id,
                "Dana",
                Some("dana@example.org"),
                born_june_2(),
            )],
            fail_for: None,
        };

        // Capture the full request instead of just the recipient.
        #[derive(Default)]
        struct Capture {
            requests: Mutex<Vec<SendMessageRequest>>,
        }

        #[async_trait]
        impl MessageService for Capture {
            async fn send(&self, request: SendMessageRequest) -> CareResult<MessageReceipt> {
                self.requests.lock().unwrap().push(request);
                Ok(MessageReceipt {
                    message_id: "msg-1".to_string(),
                    queued_at: Utc::now(),
                })
            }
        }

        let capture = Arc::new(Capture::default());
        let service = BirthdayNotificationServiceImpl::new(
            Arc::new(InMemoryOrgRepo {
                organizations: vec![org],
            }),
            Arc::new(members),
            Arc::clone(&capture) as Arc<dyn MessageService>,
        );

        service.run(Some(june_2())).await.unwrap();

        let requests = capture.requests.lock().unwrap();
        assert_eq!(requests[0].organization_id, Some(org_id));
        assert_eq!(requests[0].message_type, MessageType::Email);
        assert_eq!(requests[0].subject.as_deref(), Some("Happy birthday, Dana!"));
        assert!(requests[0]
            .body
            .as_deref()
            .unwrap()
            .contains("Grace Chapel"));
    }
}
