//! 기본 컨텍스트 도움말 매핑과 가이드 워크플로우.
//!
//! 워크플로우 액션 ID 는 단축키 액션 이름이거나, 단축키에 걸리지 않은 키는 `key:<조합>` 이다.

use xfb_a11y_core::models::guide::{ContextHelpMapping, WorkflowDefinition, WorkflowStep};

pub const FIRST_TIME_USER: &str = "first_time_user";
pub const PLAYER_OPERATION: &str = "player_operation";

pub fn default_mappings() -> Vec<ContextHelpMapping> {
    vec![
        ContextHelpMapping::new("player", "player_controls_overview")
            .with_audio("Player controls. Use Space to play/pause, Ctrl+Up/Down for volume.")
            .with_priority(90)
            .auto_trigger(Some(3000)),
        ContextHelpMapping::new("QTableView", "database_management_overview")
            .with_audio("Database grid. Use arrow keys to navigate, F2 to edit, Enter to confirm.")
            .with_priority(85)
            .auto_trigger(Some(5000)),
        // 지연 없음 = 설정의 기본 지연
        ContextHelpMapping::new("QListWidget", "playlist_management_overview")
            .with_audio("Playlist. Use arrow keys to navigate, Ctrl+C/V to copy/paste tracks.")
            .with_priority(80)
            .auto_trigger(None),
        ContextHelpMapping::new("QPushButton", "general_controls_help")
            .with_audio("Button control. Press Enter or Space to activate.")
            .with_priority(50),
        ContextHelpMapping::new("QLineEdit", "text_input_help")
            .with_audio("Text input field. Type to enter text, Tab to move to next field.")
            .with_priority(60),
    ]
}

pub fn default_workflows() -> Vec<WorkflowDefinition> {
    let first_time = WorkflowDefinition::new(FIRST_TIME_USER, "First Time User Guide")
        .triggered_by("player")
        .triggered_by("QTableView")
        .with_completion_message("Congratulations! You've completed the basic XFB tutorial.")
        .step(
            WorkflowStep::new(
                "Welcome to XFB! Let's start by learning basic navigation. \
                 Press Tab to move between controls.",
                "key:Tab",
            )
            .with_audio("Press Tab key to navigate between interface elements."),
        )
        .step(
            WorkflowStep::new(
                "Great! Now press F1 to open the help system whenever you need assistance.",
                "key:F1",
            )
            .also_accepts("help")
            .with_audio("Press F1 to open help documentation."),
        )
        .step(
            WorkflowStep::new(
                "Excellent! You can also press Shift+F1 for context-sensitive help on any control.",
                "context_help",
            )
            .also_accepts("key:Shift+F1")
            .with_audio("Press Shift+F1 for context-specific help."),
        );

    let player = WorkflowDefinition::new(PLAYER_OPERATION, "Player Operation Guide")
        .triggered_by("player")
        .with_completion_message("You now know the basic player controls!")
        .step(
            WorkflowStep::new(
                "Let's learn player controls. First, press Space to start or pause playback.",
                "play_pause",
            )
            .also_accepts("key:Space")
            .with_audio("Press Space bar to toggle play and pause."),
        )
        .step(
            WorkflowStep::new(
                "Good! Now try adjusting volume with Ctrl+Up or Ctrl+Down.",
                "volume_up",
            )
            .also_accepts("volume_down")
            .with_audio("Use Ctrl+Up and Ctrl+Down to adjust volume."),
        );

    vec![first_time, player]
}
