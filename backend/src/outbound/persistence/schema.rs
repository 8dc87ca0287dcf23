//! Diesel schema definitions mirroring the SQL migrations.

diesel::table! {
    users (id) {
        id -> Uuid,
        name -> Text,
        email -> Text,
        reports_today -> Int4,
        last_report_date -> Nullable<Timestamptz>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    issues (id) {
        id -> Uuid,
        title -> Text,
        description -> Text,
        location -> Text,
        type_of_issue -> Text,
        image -> Nullable<Text>,
        status -> Text,
        reported_by -> Text,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, issues);
