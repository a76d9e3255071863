// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel table definitions for the incident store.
//!
//! Timestamps are stored as RFC 3339 `TEXT`; JSON list columns
//! (`images_json`, `days_of_week_json`) hold serialized string arrays.

diesel::table! {
    incidents (id) {
        id -> Text,
        category -> Text,
        description -> Text,
        longitude -> Double,
        latitude -> Double,
        address -> Nullable<Text>,
        images_json -> Text,
        status -> Text,
        resolved_at -> Nullable<Text>,
        reporter_id -> Nullable<Text>,
        event_date -> Nullable<Text>,
        days_of_week_json -> Text,
        time_of_day -> Nullable<Text>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    status_logs (log_id) {
        log_id -> BigInt,
        incident_id -> Text,
        previous_status -> Text,
        new_status -> Text,
        changed_at -> Text,
        changed_by_id -> Text,
        changed_by_type -> Text,
    }
}

diesel::table! {
    notifications (notification_id) {
        notification_id -> BigInt,
        recipient_id -> Text,
        message -> Text,
        incident_id -> Text,
        is_read -> Bool,
        created_at -> Text,
    }
}

diesel::table! {
    comments (comment_id) {
        comment_id -> BigInt,
        incident_id -> Text,
        author_id -> Text,
        body -> Text,
        posted_at -> Text,
    }
}

diesel::joinable!(status_logs -> incidents (incident_id));
diesel::joinable!(notifications -> incidents (incident_id));
diesel::joinable!(comments -> incidents (incident_id));

diesel::allow_tables_to_appear_in_same_query!(incidents, status_logs, notifications, comments);
