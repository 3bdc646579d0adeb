use config as config_crate;
use serde::Deserialize;

/// Configuração operacional do alertador.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Endpoint da API do PRTG (tabela de sensores em JSON).
    pub prtg_api_url: String,
    /// URL do webhook de entrada do chat.
    pub webhook_url: String,
    /// Arquivo com um objid de sensor por linha.
    pub sensor_ids_file: String,
    /// Nome exibido pelo bot nas mensagens.
    pub bot_username: String,
    /// Intervalo entre ciclos em segundos.
    pub cycle_interval_secs: u64,
    /// Timeout em segundos para cada requisição HTTP.
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let settings = config_crate::Config::builder()
            .set_default("bot_username", "PRTG-ALERT")?
            .set_default("cycle_interval_secs", 60)?
            .set_default("request_timeout_secs", 30)?
            .add_source(config_crate::File::with_name("config"))
            .add_source(config_crate::Environment::with_prefix("PRTG_ALERTA"))
            .build()?;
        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Validação dos valores carregados.
    pub fn validate(&self) -> Result<(), String> {
        if self.prtg_api_url.trim().is_empty() {
            return Err("prtg_api_url não pode ser vazio".into());
        }
        if self.webhook_url.trim().is_empty() {
            return Err("webhook_url não pode ser vazio".into());
        }
        if self.cycle_interval_secs == 0 {
            return Err("cycle_interval_secs deve ser maior que zero".into());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs deve ser maior que zero".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            prtg_api_url: "http://prtg.local/api/table.json".into(),
            webhook_url: "https://chat.local/hooks/abc".into(),
            sensor_ids_file: "sensor_objids.txt".into(),
            bot_username: "PRTG-ALERT".into(),
            cycle_interval_secs: 60,
            request_timeout_secs: 30,
        }
    }

    #[test]
    fn accepts_sane_values() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn rejects_zero_interval_and_timeout() {
        let mut cfg = sample();
        cfg.cycle_interval_secs = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = sample();
        cfg.request_timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_blank_endpoints() {
        let mut cfg = sample();
        cfg.webhook_url = "  ".into();
        assert!(cfg.validate().is_err());
    }
}
