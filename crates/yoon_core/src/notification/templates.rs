//! Notification template builders.
//!
//! # Responsibility
//! - Map domain events to notification payloads (title, message,
//!   category, action link, metadata).
//!
//! # Invariants
//! - Builders are pure and total: no state, no I/O, no failure path.
//! - Category selection follows fixed per-event rules.

use crate::model::legal::LegalTextId;
use crate::model::notification::{
    ConsultationStatus, LegalUpdateKind, NewNotification, NotificationCategory,
    NotificationMetadata,
};
use serde_json::Value;
use std::collections::BTreeMap;

/// Domain event that can be announced to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    SearchCompleted {
        user_id: String,
        query: String,
        result_count: usize,
    },
    LegalUpdate {
        affected_texts: Vec<LegalTextId>,
        kind: LegalUpdateKind,
    },
    ExpertAvailability {
        expert_count: u32,
        domain: String,
    },
    ConsultationCreated {
        consultation_id: String,
        user_id: String,
        subject: String,
    },
    ConsultationStatusChanged {
        consultation_id: String,
        user_id: String,
        status: ConsultationStatus,
    },
    NewMessage {
        conversation_id: String,
        sender_id: String,
        sender_name: String,
        receiver_id: String,
    },
    DocumentUploaded {
        document_id: String,
        name: String,
        user_id: String,
    },
    ExpertRegistered {
        expert_id: String,
        name: String,
    },
    AdminAlert {
        title: String,
        message: String,
        category: Option<NotificationCategory>,
        details: BTreeMap<String, Value>,
    },
    PaymentReminder {
        payment_id: String,
        user_id: String,
        amount: u64,
    },
    PaymentConfirmed {
        payment_id: String,
        user_id: String,
        amount: u64,
    },
    SystemMaintenance {
        date: String,
        start_time: String,
        end_time: String,
    },
    AppUpdate {
        version: String,
    },
}

/// Builds the notification payload announcing `event`.
pub fn build(event: &NotificationEvent) -> NewNotification {
    match event {
        NotificationEvent::SearchCompleted {
            user_id,
            query,
            result_count,
        } => search_completed(user_id, query, *result_count),
        NotificationEvent::LegalUpdate {
            affected_texts,
            kind,
        } => legal_update(affected_texts, *kind),
        NotificationEvent::ExpertAvailability {
            expert_count,
            domain,
        } => expert_availability(*expert_count, domain),
        NotificationEvent::ConsultationCreated {
            consultation_id,
            user_id,
            subject,
        } => consultation_created(consultation_id, user_id, subject),
        NotificationEvent::ConsultationStatusChanged {
            consultation_id,
            user_id,
            status,
        } => consultation_status_changed(consultation_id, user_id, *status),
        NotificationEvent::NewMessage {
            conversation_id,
            sender_id,
            sender_name,
            receiver_id,
        } => new_message(conversation_id, sender_id, sender_name, receiver_id),
        NotificationEvent::DocumentUploaded {
            document_id,
            name,
            user_id,
        } => document_uploaded(document_id, name, user_id),
        NotificationEvent::ExpertRegistered { expert_id, name } => {
            expert_registered(expert_id, name)
        }
        NotificationEvent::AdminAlert {
            title,
            message,
            category,
            details,
        } => admin_alert(title, message, *category, details.clone()),
        NotificationEvent::PaymentReminder {
            payment_id,
            user_id,
            amount,
        } => payment_reminder(payment_id, user_id, *amount),
        NotificationEvent::PaymentConfirmed {
            payment_id,
            user_id,
            amount,
        } => payment_confirmed(payment_id, user_id, *amount),
        NotificationEvent::SystemMaintenance {
            date,
            start_time,
            end_time,
        } => system_maintenance(date, start_time, end_time),
        NotificationEvent::AppUpdate { version } => app_update(version),
    }
}

/// Zero results warn, anything else succeeds.
pub fn search_completed(user_id: &str, query: &str, result_count: usize) -> NewNotification {
    let category = if result_count > 0 {
        NotificationCategory::Success
    } else {
        NotificationCategory::Warning
    };

    NewNotification::new(
        "Recherche juridique complétée",
        format!("Votre recherche \"{query}\" a retourné {result_count} résultat(s)"),
        category,
    )
    .with_owner(user_id)
    .with_action_link("/legal-search")
    .with_metadata(NotificationMetadata::LegalSearch {
        search_query: query.to_string(),
        results_count: result_count,
    })
}

pub fn legal_update(affected_texts: &[LegalTextId], kind: LegalUpdateKind) -> NewNotification {
    let what = match kind {
        LegalUpdateKind::New => "nouveaux textes juridiques ajoutés",
        LegalUpdateKind::Modified => "textes juridiques modifiés",
        LegalUpdateKind::Abrogated => "textes juridiques abrogés",
    };

    NewNotification::new(
        "Mise à jour juridique",
        format!("{} {what} dans la base de données", affected_texts.len()),
        NotificationCategory::Info,
    )
    .with_metadata(NotificationMetadata::LegalUpdate {
        affected_texts: affected_texts.to_vec(),
        update_type: kind,
    })
}

pub fn expert_availability(expert_count: u32, domain: &str) -> NewNotification {
    NewNotification::new(
        "Experts disponibles",
        format!("{expert_count} expert(s) en {domain} disponible(s) pour consultation"),
        NotificationCategory::Info,
    )
    .with_action_link("/experts")
    .with_metadata(NotificationMetadata::ExpertAvailability {
        expert_count,
        domain: domain.to_string(),
    })
}

pub fn consultation_created(
    consultation_id: &str,
    user_id: &str,
    subject: &str,
) -> NewNotification {
    NewNotification::new(
        "Nouvelle demande de consultation",
        format!("Votre demande de consultation en {subject} a été envoyée avec succès"),
        NotificationCategory::Success,
    )
    .with_owner(user_id)
    .with_action_link(format!("/consultations/{consultation_id}"))
    .with_metadata(NotificationMetadata::ConsultationCreated {
        consultation_id: consultation_id.to_string(),
    })
}

/// Accepted and completed consultations succeed; other states inform.
pub fn consultation_status_changed(
    consultation_id: &str,
    user_id: &str,
    status: ConsultationStatus,
) -> NewNotification {
    let message = match status {
        ConsultationStatus::Accepted => "Votre consultation a été acceptée par un expert",
        ConsultationStatus::Rejected => "Votre consultation a été refusée",
        ConsultationStatus::InProgress => "Votre consultation est en cours",
        ConsultationStatus::Completed => "Votre consultation est terminée",
        ConsultationStatus::Cancelled => "Votre consultation a été annulée",
        ConsultationStatus::Pending => "Statut de consultation mis à jour",
    };
    let category = match status {
        ConsultationStatus::Accepted | ConsultationStatus::Completed => {
            NotificationCategory::Success
        }
        _ => NotificationCategory::Info,
    };

    NewNotification::new("Mise à jour de consultation", message, category)
        .with_owner(user_id)
        .with_action_link(format!("/consultations/{consultation_id}"))
        .with_metadata(NotificationMetadata::ConsultationStatusChanged {
            consultation_id: consultation_id.to_string(),
            new_status: status,
        })
}

pub fn new_message(
    conversation_id: &str,
    sender_id: &str,
    sender_name: &str,
    receiver_id: &str,
) -> NewNotification {
    NewNotification::new(
        "Nouveau message",
        format!("Nouveau message de {sender_name}"),
        NotificationCategory::Info,
    )
    .with_owner(receiver_id)
    .with_action_link(format!("/messages/{conversation_id}"))
    .with_metadata(NotificationMetadata::NewMessage {
        conversation_id: conversation_id.to_string(),
        sender_id: sender_id.to_string(),
    })
}

pub fn document_uploaded(document_id: &str, name: &str, user_id: &str) -> NewNotification {
    NewNotification::new(
        "Document ajouté",
        format!("Le document \"{name}\" a été ajouté à vos favoris"),
        NotificationCategory::Success,
    )
    .with_owner(user_id)
    .with_action_link("/favorites")
    .with_metadata(NotificationMetadata::DocumentUploaded {
        document_id: document_id.to_string(),
        document_name: name.to_string(),
    })
}

pub fn expert_registered(expert_id: &str, name: &str) -> NewNotification {
    NewNotification::new(
        "Nouvel expert inscrit",
        format!("{name} s'est inscrit comme expert"),
        NotificationCategory::Info,
    )
    .with_action_link(format!("/experts/{expert_id}"))
    .with_metadata(NotificationMetadata::ExpertRegistration {
        expert_id: expert_id.to_string(),
    })
}

/// Free-form administrative alert; category defaults to warning.
pub fn admin_alert(
    title: &str,
    message: &str,
    category: Option<NotificationCategory>,
    details: BTreeMap<String, Value>,
) -> NewNotification {
    NewNotification::new(
        title,
        message,
        category.unwrap_or(NotificationCategory::Warning),
    )
    .with_metadata(NotificationMetadata::AdminAlert { details })
}

pub fn payment_reminder(payment_id: &str, user_id: &str, amount: u64) -> NewNotification {
    NewNotification::new(
        "Rappel de paiement",
        format!("Vous avez une facture de {amount} FCFA en attente"),
        NotificationCategory::Warning,
    )
    .with_owner(user_id)
    .with_action_link(format!("/payments/{payment_id}"))
    .with_metadata(NotificationMetadata::PaymentReminder {
        payment_id: payment_id.to_string(),
        amount,
    })
}

pub fn payment_confirmed(payment_id: &str, user_id: &str, amount: u64) -> NewNotification {
    NewNotification::new(
        "Paiement confirmé",
        format!("Votre paiement de {amount} FCFA a été confirmé"),
        NotificationCategory::Success,
    )
    .with_owner(user_id)
    .with_action_link(format!("/payments/{payment_id}"))
    .with_metadata(NotificationMetadata::PaymentConfirmed {
        payment_id: payment_id.to_string(),
        amount,
    })
}

pub fn system_maintenance(date: &str, start_time: &str, end_time: &str) -> NewNotification {
    NewNotification::new(
        "Maintenance du système",
        format!("Maintenance prévue le {date} de {start_time} à {end_time}"),
        NotificationCategory::Warning,
    )
    .with_metadata(NotificationMetadata::Maintenance {
        date: date.to_string(),
        start_time: start_time.to_string(),
        end_time: end_time.to_string(),
    })
}

pub fn app_update(version: &str) -> NewNotification {
    NewNotification::new(
        "Mise à jour disponible",
        "Une nouvelle version de l'application est disponible",
        NotificationCategory::Info,
    )
    .with_action_link("/download")
    .with_metadata(NotificationMetadata::AppUpdate {
        version: version.to_string(),
    })
}

/// Demo set used by the notification test screen.
pub fn sample_notifications() -> Vec<NewNotification> {
    vec![
        search_completed("user_1", "contrat de travail", 3),
        search_completed("user_2", "divorce", 5),
        legal_update(&[16, 20, 22], LegalUpdateKind::Modified),
        expert_availability(8, "Droit du travail"),
    ]
}

/// Updates matching the user's declared interests.
///
/// Interests are matched case-insensitively against the known domain
/// labels; unknown interests contribute nothing.
pub fn personalized_notifications(interests: &[&str]) -> Vec<NewNotification> {
    let has = |label: &str| {
        interests
            .iter()
            .any(|interest| interest.trim().to_lowercase() == label)
    };

    let mut notifications = Vec::new();
    if has("droit du travail") {
        notifications.push(legal_update(&[20], LegalUpdateKind::Modified));
        notifications.push(expert_availability(12, "Droit du travail"));
    }
    if has("droit de la famille") {
        notifications.push(legal_update(&[19], LegalUpdateKind::Modified));
    }
    if has("droit pénal") {
        notifications.push(legal_update(&[16], LegalUpdateKind::New));
    }
    notifications
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_category_depends_on_result_count() {
        assert_eq!(
            search_completed("u", "contrat", 0).category,
            NotificationCategory::Warning
        );
        let found = search_completed("u", "contrat", 2);
        assert_eq!(found.category, NotificationCategory::Success);
        assert_eq!(
            found.message,
            "Votre recherche \"contrat\" a retourné 2 résultat(s)"
        );
        assert_eq!(found.owner_user_id.as_deref(), Some("u"));
        assert_eq!(found.action_link.as_deref(), Some("/legal-search"));
    }

    #[test]
    fn consultation_status_category_rules() {
        let success = [ConsultationStatus::Accepted, ConsultationStatus::Completed];
        let info = [
            ConsultationStatus::Pending,
            ConsultationStatus::Rejected,
            ConsultationStatus::InProgress,
            ConsultationStatus::Cancelled,
        ];
        for status in success {
            assert_eq!(
                consultation_status_changed("c1", "u", status).category,
                NotificationCategory::Success
            );
        }
        for status in info {
            assert_eq!(
                consultation_status_changed("c1", "u", status).category,
                NotificationCategory::Info
            );
        }
        assert_eq!(
            consultation_status_changed("c1", "u", ConsultationStatus::Pending).message,
            "Statut de consultation mis à jour"
        );
    }

    #[test]
    fn legal_update_counts_affected_texts() {
        let update = legal_update(&[16, 20, 22], LegalUpdateKind::Abrogated);
        assert_eq!(
            update.message,
            "3 textes juridiques abrogés dans la base de données"
        );
        assert_eq!(update.owner_user_id, None);
        assert!(matches!(
            update.metadata,
            Some(NotificationMetadata::LegalUpdate {
                update_type: LegalUpdateKind::Abrogated,
                ..
            })
        ));
    }

    #[test]
    fn admin_alert_defaults_to_warning() {
        let alert = admin_alert("Quota", "Disque plein", None, BTreeMap::new());
        assert_eq!(alert.category, NotificationCategory::Warning);
        let alert = admin_alert(
            "Incident",
            "Résolu",
            Some(NotificationCategory::Success),
            BTreeMap::new(),
        );
        assert_eq!(alert.category, NotificationCategory::Success);
    }

    #[test]
    fn build_dispatches_to_matching_builder() {
        let event = NotificationEvent::PaymentReminder {
            payment_id: "p9".to_string(),
            user_id: "u".to_string(),
            amount: 15_000,
        };
        assert_eq!(build(&event), payment_reminder("p9", "u", 15_000));
        assert_eq!(
            build(&event).message,
            "Vous avez une facture de 15000 FCFA en attente"
        );
        assert_eq!(
            build(&NotificationEvent::AppUpdate {
                version: "2.1.0".to_string()
            })
            .action_link
            .as_deref(),
            Some("/download")
        );
    }

    #[test]
    fn personalized_notifications_follow_interests() {
        assert!(personalized_notifications(&["droit fiscal"]).is_empty());

        let labour = personalized_notifications(&["Droit du travail"]);
        assert_eq!(labour.len(), 2);
        assert_eq!(
            labour[1].message,
            "12 expert(s) en Droit du travail disponible(s) pour consultation"
        );

        let all = personalized_notifications(&[
            "droit du travail",
            "droit de la famille",
            "droit pénal",
        ]);
        assert_eq!(all.len(), 4);
        assert_eq!(sample_notifications().len(), 4);
    }
}
