use crate::domain::report::{MonthlyRevenue, ReportSummary};

pub struct ReportsPageData {
    pub summary: ReportSummary,
    pub revenue_by_month: Vec<MonthlyRevenue>,
}
