/// User actions that can be triggered by commands or key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Copy the current code to the clipboard
    CopyCode,
    /// Save the current code to an .html file
    ExportCode,
    /// Remount the preview surface
    RefreshPreview,
    /// Switch the output panel to the code view
    ShowSource,
    /// Switch the output panel to the preview view
    ShowPreview,
    /// Toggle fenced-block stripping of backend responses
    ToggleRawResult,
    /// Clear the prompt box
    ClearPrompt,
    /// Show key bindings and commands
    Help,
    /// Exit the application
    Quit,
}
