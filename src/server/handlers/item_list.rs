use crate::item::{ItemError, ItemFilter, ItemStatus, ItemStore, ItemType};
use crate::server::convert::item_to_proto;
use crate::server::helpers::{count_u32, nonempty, nonzero_usize};
use crate::server::proto::{ListItemsRequest, ListItemsResponse};
use crate::server::structured_error::to_error_json;
use tonic::{Response, Status};

/// Build the store filter for a list request. Public callers are pinned to
/// approved items whatever status they ask for.
pub fn filter_from_request(req: ListItemsRequest, admin: bool) -> Result<ItemFilter, ItemError> {
    let status = if admin {
        nonempty(req.status)
            .map(|s| s.trim().parse::<ItemStatus>())
            .transpose()
            .map_err(|e| ItemError::validation("status", e))?
    } else {
        Some(ItemStatus::Approved)
    };
    let item_type = nonempty(req.item_type)
        .map(|t| t.trim().parse::<ItemType>())
        .transpose()
        .map_err(|e| ItemError::validation("type", e))?;

    Ok(ItemFilter {
        status,
        item_type,
        category: nonempty(req.category),
        query: nonempty(req.q),
        limit: nonzero_usize(req.limit),
        offset: nonzero_usize(req.offset),
    })
}

pub async fn list_items(
    items: &ItemStore,
    req: ListItemsRequest,
    admin: bool,
) -> Result<Response<ListItemsResponse>, Status> {
    let filter = match filter_from_request(req, admin) {
        Ok(filter) => filter,
        Err(e) => {
            return Ok(Response::new(ListItemsResponse {
                success: false,
                error: to_error_json(&e),
                items: vec![],
                total_count: 0,
            }))
        }
    };

    let page = items.list(&filter).await;
    Ok(Response::new(ListItemsResponse {
        success: true,
        error: String::new(),
        items: page.items.iter().map(item_to_proto).collect(),
        total_count: count_u32(page.total),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_filter_is_pinned_to_approved() {
        let req = ListItemsRequest {
            status: "Pending".to_string(),
            ..Default::default()
        };
        let filter = filter_from_request(req, false).unwrap();
        assert_eq!(filter.status, Some(ItemStatus::Approved));
    }

    #[test]
    fn test_admin_filter_keeps_requested_status() {
        let req = ListItemsRequest {
            status: "rejected".to_string(),
            limit: 10,
            ..Default::default()
        };
        let filter = filter_from_request(req, true).unwrap();
        assert_eq!(filter.status, Some(ItemStatus::Rejected));
        assert_eq!(filter.limit, Some(10));
        assert_eq!(filter.offset, None);
    }

    #[test]
    fn test_admin_without_status_sees_everything() {
        let filter = filter_from_request(ListItemsRequest::default(), true).unwrap();
        assert_eq!(filter.status, None);
    }

    #[test]
    fn test_unknown_type_is_validation_error() {
        let req = ListItemsRequest {
            item_type: "Stolen".to_string(),
            ..Default::default()
        };
        let err = filter_from_request(req, false).unwrap_err();
        assert_eq!(err.field(), Some("type"));
    }
}
