//! Diesel schema for to-do persistence.

diesel::table! {
    /// Task group records.
    task_groups (id) {
        /// Group identifier.
        id -> Uuid,
        /// Group display name.
        #[max_length = 255]
        name -> Varchar,
        /// Whether every task in the group is displayed.
        show_all -> Bool,
        /// Sort order preference.
        #[max_length = 50]
        sort_order -> Varchar,
        /// Soft-delete flag.
        is_deleted -> Bool,
        /// Insertion timestamp assigned by the database.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning group identifier.
        group_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Starred flag.
        is_starred -> Bool,
        /// Completed flag.
        is_completed -> Bool,
        /// Completion timestamp, set while completed.
        completed_at -> Nullable<Timestamptz>,
        /// Soft-delete flag.
        is_deleted -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Subtask records.
    sub_tasks (id) {
        /// Subtask identifier.
        id -> Uuid,
        /// Owning task identifier.
        task_id -> Uuid,
        /// Subtask title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional free-form description.
        description -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Starred flag.
        is_starred -> Bool,
        /// Completed flag.
        is_completed -> Bool,
        /// Completion timestamp, set while completed.
        completed_at -> Nullable<Timestamptz>,
        /// Soft-delete flag.
        is_deleted -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
