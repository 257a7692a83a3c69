// src/relevance.rs
//! Relevance gate: decides whether a fetched entry is economic news.
//!
//! Economy/finance feeds are in-domain by construction; everything else must
//! carry at least one term from the fixed Korean keyword set in its title.

use crate::ingest::types::FeedCategory;

/// Korean economic/financial terms spanning macro indicators, asset classes,
/// sectors, and institutions. Case-sensitive substring match.
pub const ECONOMIC_KEYWORDS: &[&str] = &[
    "경제", "금융", "주식", "부동산", "증시", "환율", "GDP", "금리", "인플레이션",
    "기업", "산업", "무역", "투자", "시장", "코스피", "코스닥", "재정", "예산",
    "은행", "대출", "적금", "펀드", "보험", "카드", "결제", "핀테크",
    "수출", "수입", "관세", "통상", "FTA", "제조업", "서비스업",
    "반도체", "자동차", "조선", "철강", "화학", "바이오", "IT", "AI",
    "부가세", "소득세", "법인세", "세금", "세율", "조세",
    "채권", "국채", "회사채", "수익률", "배당",
    "소비", "물가", "가격", "비용", "매출", "수익", "손실",
    "고용", "취업", "실업", "일자리", "임금", "연봉",
    "정부", "한국은행", "금융위", "기획재정부",
    "달러", "원화", "유로", "엔화", "위안화",
];

/// True when the feed category is already economic, or the title mentions at
/// least one domain keyword. Pure function.
pub fn is_relevant(title: &str, category: FeedCategory) -> bool {
    if matches!(category, FeedCategory::Economy | FeedCategory::Finance) {
        return true;
    }
    ECONOMIC_KEYWORDS.iter().any(|kw| title.contains(kw))
}
