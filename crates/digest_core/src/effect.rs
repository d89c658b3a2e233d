use std::time::Duration;

use crate::{RequestId, ToastId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchList {
        request_id: RequestId,
        page: u32,
        page_size: u32,
    },
    FetchDetail {
        request_id: RequestId,
        filename: String,
    },
    ScrollToTop,
    ScheduleToastDismiss {
        toast_id: ToastId,
        after: Duration,
    },
}
