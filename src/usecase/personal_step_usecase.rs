use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        error::DomainError,
        formatters::non_blank,
        models::{
            personal::{Document, Email, Gender, Password, PersonalData},
            session::{Page, Session, SessionId},
        },
        repositories::session_repository::SessionRepository,
    },
    usecase::step_form::{self, StepForm},
};

/// Raw personal-data form as typed by the provider
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInput {
    #[serde(default)]
    pub nome: String,
    #[serde(default)]
    pub sobrenome: String,
    #[serde(default)]
    pub documento: String,
    pub genero: Option<String>,
    pub rg_url: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub senha: String,
}

pub struct PersonalStepUsecase<S: SessionRepository> {
    session_repository: S,
}

impl<S: SessionRepository> PersonalStepUsecase<S> {
    pub fn new(session_repository: S) -> Self {
        Self { session_repository }
    }

    pub async fn advance(&self, id: SessionId, input: PersonalInput) -> Result<Session, DomainError> {
        step_form::advance(&self.session_repository, self, id, input).await
    }
}

/// Names of required fields left blank, in form order.
pub(crate) fn missing_fields(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

impl<S: SessionRepository> StepForm for PersonalStepUsecase<S> {
    type Input = PersonalInput;
    type Fragment = PersonalData;

    const NEXT: Page = Page::CadastroProfissional;

    fn collect(&self, input: PersonalInput, _session: &Session) -> Result<PersonalData, DomainError> {
        let missing = missing_fields(&[
            ("nome", input.nome.as_str()),
            ("sobrenome", input.sobrenome.as_str()),
            ("documento", input.documento.as_str()),
            ("email", input.email.as_str()),
            ("senha", input.senha.as_str()),
        ]);
        if !missing.is_empty() {
            return Err(DomainError::MissingFields(missing));
        }

        let document = Document::new(&input.documento)?;
        let email = Email::new(&input.email)?;
        let password = Password::new(input.senha)?;
        let gender = non_blank(input.genero.as_deref())
            .map(|g| Gender::parse(&g))
            .transpose()?;

        Ok(PersonalData {
            first_name: input.nome.trim().to_string(),
            last_name: input.sobrenome.trim().to_string(),
            document,
            gender,
            id_document_url: non_blank(input.rg_url.as_deref()),
            email,
            password,
        })
    }

    fn persist(&self, fragment: PersonalData, session: &mut Session) {
        session.draft.set_personal(fragment);
    }
}

#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;
    use crate::{
        domain::models::draft::Fragment,
        infrastructure::session_store::InMemorySessionRepository,
    };

    fn valid_input() -> PersonalInput {
        PersonalInput {
            nome: "João".into(),
            sobrenome: "Silva".into(),
            documento: "987.654.321-00".into(),
            genero: Some("masculino".into()),
            rg_url: Some("https://exemplo.com/rg.jpg".into()),
            email: "joao.silva@email.com".into(),
            senha: "senhaSegura123".into(),
        }
    }

    #[fixture]
    fn store() -> InMemorySessionRepository {
        InMemorySessionRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn test_advance_writes_one_fragment_and_moves_on(store: InMemorySessionRepository) {
        let session = store.create().await.unwrap();
        let usecase = PersonalStepUsecase::new(store.clone());

        let advanced = usecase.advance(session.id(), valid_input()).await.unwrap();

        assert_eq!(advanced.current_page(), Page::CadastroProfissional);
        assert_eq!(advanced.draft.present(), vec![Fragment::Personal]);
        let personal = advanced.draft.personal().unwrap();
        assert_eq!(personal.document.as_str(), "98765432100");
        assert_eq!(personal.gender, Some(Gender::Masculino));

        let stored = store.find(session.id()).await.unwrap().unwrap();
        assert_eq!(stored.draft.present(), vec![Fragment::Personal]);
    }

    #[rstest]
    #[case::nome(PersonalInput { nome: "".into(), ..valid_input() }, vec!["nome"])]
    #[case::sobrenome(PersonalInput { sobrenome: " ".into(), ..valid_input() }, vec!["sobrenome"])]
    #[case::documento(PersonalInput { documento: "".into(), ..valid_input() }, vec!["documento"])]
    #[case::email(PersonalInput { email: "".into(), ..valid_input() }, vec!["email"])]
    #[case::senha_e_nome(PersonalInput { nome: "".into(), senha: "".into(), ..valid_input() }, vec!["nome", "senha"])]
    #[tokio::test]
    async fn test_missing_field_leaves_draft_untouched(
        store: InMemorySessionRepository,
        #[case] input: PersonalInput,
        #[case] expected: Vec<&'static str>,
    ) {
        let session = store.create().await.unwrap();
        let usecase = PersonalStepUsecase::new(store.clone());

        let result = usecase.advance(session.id(), input).await;

        match result {
            Err(DomainError::MissingFields(fields)) => assert_eq!(fields, expected),
            other => panic!("expected MissingFields, got {other:?}"),
        }
        let stored = store.find(session.id()).await.unwrap().unwrap();
        assert!(stored.draft.is_empty());
        assert_eq!(stored.current_page(), Page::Inicio);
    }

    #[rstest]
    #[case(PersonalInput { documento: "123.456".into(), ..valid_input() })]
    #[case(PersonalInput { email: "joao@email".into(), ..valid_input() })]
    #[case(PersonalInput { senha: "12345".into(), ..valid_input() })]
    #[case(PersonalInput { genero: Some("robô".into()), ..valid_input() })]
    #[tokio::test]
    async fn test_malformed_fields_rejected(
        store: InMemorySessionRepository,
        #[case] input: PersonalInput,
    ) {
        let session = store.create().await.unwrap();
        let usecase = PersonalStepUsecase::new(store.clone());

        assert!(usecase.advance(session.id(), input).await.is_err());
        let stored = store.find(session.id()).await.unwrap().unwrap();
        assert!(stored.draft.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_unknown_session(store: InMemorySessionRepository) {
        let usecase = PersonalStepUsecase::new(store);
        let result = usecase.advance(SessionId::new(), valid_input()).await;
        assert!(matches!(result, Err(DomainError::SessionNotFound)));
    }
}
