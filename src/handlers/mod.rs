pub mod quiz_handler;

pub use quiz_handler::{
    check_quiz, create_quiz, delete_quiz, edit_quiz, health_check, health_check_ready,
    list_quizzes, new_quiz, play_quiz, quiz_attachment, show_quiz, update_quiz,
};
