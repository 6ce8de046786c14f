use chrono::SecondsFormat;

use crate::item::{Item, ItemStats};
use crate::message::Message;
use crate::server::helpers::count_u32;
use crate::server::proto::{
    GetModerationStatsResponse, Item as ProtoItem, ItemMessage as ProtoMessage,
};

#[must_use]
pub fn item_to_proto(item: &Item) -> ProtoItem {
    ProtoItem {
        id: item.id.clone(),
        title: item.title.clone(),
        item_type: item.item_type.to_string(),
        category: item.category.clone(),
        description: item.description.clone(),
        location_text: item.location_text.clone(),
        date_seen: item.date_seen.format("%Y-%m-%d").to_string(),
        images: item.images.clone(),
        posted_by_name: item.posted_by_name.clone(),
        posted_by_email: item.posted_by_email.clone(),
        status: item.status.to_string(),
        created_at: item.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        updated_at: item.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        spam_reports: item.spam_reports,
    }
}

#[must_use]
pub fn message_to_proto(message: &Message) -> ProtoMessage {
    ProtoMessage {
        id: message.id.clone(),
        item_id: message.item_id.clone().unwrap_or_default(),
        from_name: message.from_name.clone(),
        from_email: message.from_email.clone(),
        subject: message.subject.clone(),
        body: message.body.clone(),
        created_at: message
            .created_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        is_spam_report: message.is_spam_report,
    }
}

#[must_use]
pub fn stats_to_proto(stats: &ItemStats, total_messages: usize) -> GetModerationStatsResponse {
    GetModerationStatsResponse {
        total_items: count_u32(stats.total),
        pending_items: count_u32(stats.pending),
        approved_items: count_u32(stats.approved),
        rejected_items: count_u32(stats.rejected),
        resolved_items: count_u32(stats.resolved),
        flagged_items: count_u32(stats.flagged),
        total_messages: count_u32(total_messages),
    }
}
