/// Cross-encoder reported when the bi-encoder is not in [`ENCODER_MODELS`].
pub const FALLBACK_CROSS_ENCODER: &str = "aubmindlab/araelectra-base-discriminator";

/// Cross-encoder reported on verse-detail records.
pub const DETAIL_CROSS_ENCODER: &str = "Rifky/Indobert-QA";

/// Bi-encoder → cross-encoder used by the backend to re-rank its hits.
pub const ENCODER_MODELS: &[(&str, &str)] = &[
    ("firqaaa/indo-sentence-bert-base", "Rifky/Indobert-QA"),
    ("indobenchmark/indobert-base-p1", "indobenchmark/indobert-base-p2"),
    ("msmarco-distilbert-base-tas-b", "cross-encoder/ms-marco-MiniLM-L-6-v2"),
    ("aubmindlab/bert-base-arabert", "aubmindlab/araelectra-base-discriminator"),
    ("text-embedding-ada-002", "gpt-3.5-turbo-instruct"),
];

pub fn cross_encoder_for(encoder: &str) -> &'static str {
    ENCODER_MODELS
        .iter()
        .find(|(bi, _)| *bi == encoder)
        .map(|(_, cross)| *cross)
        .unwrap_or(FALLBACK_CROSS_ENCODER)
}
