//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// API defaults
pub const DEFAULT_BASE_URL: &str = "https://erp.tropeiro.app/api/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REQUEST_ATTEMPTS: u32 = 3;
pub const PROBE_TIMEOUT_SECS: u64 = 5;

// Query cache defaults
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 2_048;

// Environment variable names
pub const ENV_BASE_URL: &str = "TROPEIRO_API_BASE_URL";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "TROPEIRO_API_TIMEOUT_SECS";
pub const ENV_REQUEST_ATTEMPTS: &str = "TROPEIRO_API_ATTEMPTS";
pub const ENV_CACHE_TTL_SECS: &str = "TROPEIRO_CACHE_TTL_SECS";
pub const ENV_CACHE_MAX_ENTRIES: &str = "TROPEIRO_CACHE_MAX_ENTRIES";
pub const ENV_CONFIG_PATH: &str = "TROPEIRO_CONFIG_PATH";

// Generic user-facing fallback messages (pt-BR)
pub const MSG_REDE_INDISPONIVEL: &str =
    "Não foi possível comunicar com o servidor. Tente novamente.";
pub const MSG_SESSAO_EXPIRADA: &str = "Sua sessão expirou. Faça login novamente.";
pub const MSG_SEM_PERMISSAO: &str = "Você não tem permissão para executar esta operação.";
pub const MSG_NAO_ENCONTRADO: &str = "Registro não encontrado.";
pub const MSG_ERRO_INESPERADO: &str = "Ocorreu um erro inesperado. Tente novamente.";

// Payment validation messages (pt-BR, asserted by the UI shells)
pub const MSG_VALOR_PAGO_ZERO: &str = "Informe um valor pago maior que zero";
pub const MSG_VALOR_PAGO_EXCEDE: &str = "O valor pago não pode ser maior que o valor em aberto";
pub const MSG_LIQUIDO_EXCEDE: &str =
    "Valor líquido do pagamento não pode ser maior que o valor em aberto";
pub const MSG_DESCONTO_EXCEDE: &str =
    "O desconto não pode ser maior que o valor pago com juros e multa";
pub const MSG_CHEQUES_DIVERGEM: &str = "A soma dos cheques deve ser igual ao valor pago";
pub const MSG_ENVIO_EM_ANDAMENTO: &str = "Aguarde, o pagamento anterior ainda está sendo enviado";
pub const MSG_JA_REGISTRADO: &str = "Este pagamento já foi registrado";
pub const MSG_PAGAMENTO_REGISTRADO: &str = "Pagamento registrado com sucesso";
