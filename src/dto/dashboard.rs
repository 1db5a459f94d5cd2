use crate::domain::report::{Activity, DashboardStats, MonthlyRevenue, StatusCount};

/// Everything shown on the dashboard.
pub struct DashboardPageData {
    pub stats: DashboardStats,
    pub revenue_by_month: Vec<MonthlyRevenue>,
    pub job_statuses: Vec<StatusCount>,
    pub recent_activity: Vec<Activity>,
}
