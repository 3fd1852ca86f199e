pub mod note_store_error;
