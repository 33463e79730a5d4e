//! Entity structs for every Daybook backend resource.
//!
//! Field names follow the backend's JSON. All structs derive `Serialize`,
//! `Deserialize` and `JsonSchema` so they can be dumped with `dbk schema`.

mod dashboard;
mod diary;
mod habit;
mod listing;
mod reflection;

pub use dashboard::{
    ChoiceChart, ChoiceDataset, ChoicePoint, DashboardOverview, DashboardStats,
    DistributionBucket, HeatmapCell, LineChart, QuestionDashboard, SeriesChart, SeriesPoint,
    SeriesStatistics,
};
pub use diary::{
    BlockContent, BlockTypeCount, ContentBlock, DiaryEntry, DiaryEntryDraft, DiaryEntrySummary,
    DiaryStats,
};
pub use habit::{Habit, HabitDraft, HabitLog, HabitLogUpdate, HabitStats, QuickLog};
pub use listing::Listing;
pub use reflection::{
    QuestionAverage, QuestionCategories, QuestionDraft, Reflection, ReflectionQuestion,
    ReflectionResponse, ReflectionStats, ReflectionStreak, ReflectionSubmission, ResponsePayload,
};
