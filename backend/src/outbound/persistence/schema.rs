//! Diesel table definitions. Must match `backend/migrations` exactly.

diesel::table! {
    users (id) {
        id -> Uuid,
        display_name -> Varchar,
        /// Lower-cased; unique.
        email -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    projects (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Text,
        owner_id -> Uuid,
        created_at -> Timestamptz,
        /// Insertion order, used to break `created_at` ties.
        seq -> Int8,
    }
}

diesel::table! {
    project_members (project_id, user_id) {
        project_id -> Uuid,
        user_id -> Uuid,
        position -> Int4,
    }
}

diesel::table! {
    tickets (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        priority -> Varchar,
        status -> Varchar,
        /// May reference a deleted project.
        project_id -> Uuid,
        assignee_id -> Nullable<Uuid>,
        created_by -> Uuid,
        created_at -> Timestamptz,
        seq -> Int8,
    }
}

diesel::table! {
    comments (id) {
        id -> Uuid,
        ticket_id -> Uuid,
        author_id -> Uuid,
        body -> Text,
        created_at -> Timestamptz,
        seq -> Int8,
    }
}

diesel::joinable!(project_members -> projects (project_id));
diesel::joinable!(projects -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(users, projects, project_members, tickets, comments);
