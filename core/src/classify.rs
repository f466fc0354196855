//! Status-code classification per verb.
//!
//! `GET`, `POST`, `PUT` and `PATCH` accept any 2xx. `DELETE` accepts only
//! `200` and `204`. The rules are fixed and not configurable.

use crate::http::HttpMethod;

/// Outcome of checking a response status against the verb that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Accepted,
    Rejected { status: u16 },
}

impl Classification {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Classification::Accepted)
    }
}

pub fn classify(method: HttpMethod, status: u16) -> Classification {
    let accepted = match method {
        HttpMethod::Get | HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => {
            (200..300).contains(&status)
        }
        HttpMethod::Delete => status == 200 || status == 204,
    };
    if accepted {
        Classification::Accepted
    } else {
        Classification::Rejected { status }
    }
}
