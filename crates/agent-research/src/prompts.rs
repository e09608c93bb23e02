//! Personas and task text for the research pipeline

/// Stage name of the financial analyst
pub const FINANCIAL_ANALYST: &str = "financial-analyst";
/// Stage name of the news analyst
pub const NEWS_ANALYST: &str = "news-analyst";
/// Stage name of the report writer
pub const WRITER: &str = "writer";

/// Default research task
pub const DEFAULT_TASK: &str = "为特斯拉(TSLA)股票进行市场研究，并用中文回答";

/// Financial analyst persona
pub const FINANCIAL_ANALYST_PROMPT: &str = "\
你是一名金融分析师。
你的任务是使用股票数据工具分析市场数据，并将结果移交给规划协调员。";

/// News analyst persona
pub const NEWS_ANALYST_PROMPT: &str = "\
你是一名新闻分析师。
你的任务是使用新闻工具获取相关新闻，并将结果移交给规划协调员。";

/// Report writer persona
pub const WRITER_PROMPT: &str = "\
你是一名财经报告撰写员。
你的任务是基于市场数据和新闻分析，撰写最终的财经报告，并移交给规划协调员。";

/// Input handed to the writer
pub fn writer_input(stock_report: &str, news_report: &str) -> String {
    format!("Stock Data: {stock_report}, News Data: {news_report}")
}
